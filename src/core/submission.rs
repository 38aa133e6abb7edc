//! Order submission - The entry point for placing an order.
//!
//! A submission is validated and priced by [`order::assemble`], then written by
//! [`writer::commit`]. Whatever stage fails, the raw request and the error
//! message are handed to the error recorder before the error is returned, so
//! every rejected order leaves a diagnostic row behind.

use crate::{
    core::{
        order::{self, OrderRequest},
        recorder::{self, RawSubmission},
        transaction::TransactionWithItems,
        writer,
    },
    errors::Result,
};
use sea_orm::DatabaseConnection;
use tracing::{info, instrument, warn};

/// Validates, prices and commits an order.
///
/// # Errors
/// Returns the first error raised while assembling or committing. The error is
/// recorded in `transactions_errors` before it is returned.
#[instrument(skip(db, request), fields(customer_email = %request.customer_email))]
pub async fn submit_order(
    db: &DatabaseConnection,
    request: OrderRequest,
) -> Result<TransactionWithItems> {
    match place_order(db, &request).await {
        Ok(committed) => {
            info!(
                transaction_id = %committed.transaction.transaction_id,
                "Order placed"
            );
            Ok(committed)
        }
        Err(e) => {
            warn!("Order rejected: {e}");
            recorder::record(db, &RawSubmission::from(&request), &e.to_string()).await;
            Err(e)
        }
    }
}

async fn place_order(
    db: &DatabaseConnection,
    request: &OrderRequest,
) -> Result<TransactionWithItems> {
    let priced = order::assemble(db, request).await?;
    writer::commit(db, priced).await
}
