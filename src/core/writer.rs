//! Transaction writer - Persists a priced transaction atomically.
//!
//! The customer (when provisional), the transaction header and every line item
//! are written inside one database transaction. If any write fails, the
//! transaction is dropped without committing and `SeaORM` rolls it back, so no
//! reader ever sees a header without its lines or an orphaned customer.

use crate::{
    core::{
        catalog::{CatalogStore, NewCustomer},
        order::{CustomerResolution, PricedTransaction},
        transaction::TransactionWithItems,
    },
    entities::{transaction, transaction_item},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, DatabaseTransaction, Set, TransactionTrait, prelude::*};
use tracing::{debug, info, instrument};

/// Commits a priced transaction and returns what was stored.
///
/// # Errors
/// - [`Error::Validation`] if the total does not equal the sum of the line
///   subtotals, checked before anything is written
/// - [`Error::Persistence`] if any write fails (unique or foreign key
///   violation, I/O, lost connection); nothing is committed in that case
#[instrument(skip(db, priced), fields(transaction_id = %priced.transaction_id))]
pub async fn commit(
    db: &DatabaseConnection,
    priced: PricedTransaction,
) -> Result<TransactionWithItems> {
    let line_sum: Decimal = priced.lines.iter().map(|line| line.subtotal).sum();
    if line_sum != priced.total_spent {
        return Err(Error::validation(format!(
            "Order total {} does not match the line subtotals {line_sum}",
            priced.total_spent
        )));
    }

    // Use a transaction to ensure atomicity
    let txn = db.begin().await?;

    let customer_id = match priced.customer {
        CustomerResolution::Existing(customer_id) => customer_id,
        CustomerResolution::Provisional(new_customer) => {
            persist_provisional_customer(&txn, new_customer).await?
        }
    };

    let now = chrono::Utc::now();
    let header = transaction::ActiveModel {
        transaction_id: Set(priced.transaction_id.clone()),
        customer_id: Set(customer_id),
        payment_method_id: Set(priced.payment_method_id),
        location: Set(priced.location),
        total_spent: Set(priced.total_spent),
        status: Set(priced.status),
        created_at: Set(priced.created_at),
        updated_at: Set(now),
    }
    .insert(&txn)
    .await?;

    let mut items = Vec::with_capacity(priced.lines.len());
    for line in priced.lines {
        let item = transaction_item::ActiveModel {
            transaction_id: Set(priced.transaction_id.clone()),
            item_id: Set(line.item_id),
            quantity: Set(line.quantity),
            unit_price: Set(line.unit_price),
            subtotal: Set(line.subtotal),
        }
        .insert(&txn)
        .await?;
        items.push(item);
    }

    // Commit the transaction
    txn.commit().await?;

    info!(
        customer_id,
        total_spent = %header.total_spent,
        lines = items.len(),
        "Committed transaction"
    );

    Ok(TransactionWithItems {
        transaction: header,
        items,
    })
}

/// Writes a provisional customer, or reuses the row a concurrent order wrote
/// for the same email after this order was assembled.
///
/// The unique index on `email` still rejects a concurrent insert that slips
/// between the lookup and the insert; that surfaces as a persistence error.
async fn persist_provisional_customer(
    txn: &DatabaseTransaction,
    new_customer: NewCustomer,
) -> Result<i64> {
    if let Some(existing) = txn.find_customer_by_email(&new_customer.email).await? {
        debug!(
            customer_id = existing.customer_id,
            "Customer was created concurrently, reusing it"
        );
        return Ok(existing.customer_id);
    }

    let customer = txn.create_customer(new_customer).await?;
    debug!(customer_id = customer.customer_id, "Created customer");
    Ok(customer.customer_id)
}
