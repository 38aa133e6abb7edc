//! Error recorder - Keeps a diagnostic copy of every rejected submission.
//!
//! Rows are appended to `transactions_errors` with the submitted fields kept as
//! text. Recording is best effort: [`record`] never fails, it logs its own
//! failure and returns, so the caller's original error is always the one
//! reported.

use crate::{
    core::order::OrderRequest,
    entities::transaction_error,
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};
use serde_json::Value;
use tracing::{debug, warn};

/// Raw fields of a rejected submission, each one as text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawSubmission {
    pub transaction_id: Option<String>,
    pub customer_email: Option<String>,
    /// Requested line items as JSON text
    pub items: Option<String>,
    pub item: Option<String>,
    pub quantity: Option<String>,
    pub price_per_unit: Option<String>,
    pub total_spent: Option<String>,
    pub payment_method: Option<String>,
    pub location: Option<String>,
    pub transaction_date: Option<String>,
}

impl From<&OrderRequest> for RawSubmission {
    fn from(request: &OrderRequest) -> Self {
        Self {
            customer_email: Some(request.customer_email.clone()),
            items: serde_json::to_string(&request.items).ok(),
            payment_method: Some(request.payment_method.clone()),
            location: Some(request.location.clone()),
            transaction_date: request.transaction_date.clone(),
            ..Self::default()
        }
    }
}

impl RawSubmission {
    /// Builds a raw submission from an arbitrary JSON body, for requests that
    /// did not deserialize into an [`OrderRequest`]. Unknown keys are ignored
    /// and non-string values are kept in their JSON text form.
    #[must_use]
    pub fn from_json(body: &Value) -> Self {
        let field = |key: &str| body.get(key).and_then(value_as_text);
        Self {
            transaction_id: field("transaction_id"),
            customer_email: field("customer_email"),
            items: field("items"),
            item: field("item"),
            quantity: field("quantity"),
            price_per_unit: field("price_per_unit"),
            total_spent: field("total_spent"),
            payment_method: field("payment_method"),
            location: field("location"),
            transaction_date: field("transaction_date"),
        }
    }
}

fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// Appends an error row.
///
/// # Errors
/// Returns [`Error::Recorder`] if the insert fails.
pub async fn try_record<C>(
    db: &C,
    raw: &RawSubmission,
    error_message: &str,
) -> Result<transaction_error::Model>
where
    C: ConnectionTrait,
{
    let row = transaction_error::ActiveModel {
        transaction_id: Set(raw.transaction_id.clone()),
        customer_email: Set(raw.customer_email.clone()),
        items: Set(raw.items.clone()),
        item: Set(raw.item.clone()),
        quantity: Set(raw.quantity.clone()),
        price_per_unit: Set(raw.price_per_unit.clone()),
        total_spent: Set(raw.total_spent.clone()),
        payment_method: Set(raw.payment_method.clone()),
        location: Set(raw.location.clone()),
        transaction_date: Set(raw.transaction_date.clone()),
        error_message: Set(error_message.to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    row.insert(db).await.map_err(|e| Error::Recorder {
        message: e.to_string(),
    })
}

/// Appends an error row, logging and swallowing any failure.
pub async fn record<C>(db: &C, raw: &RawSubmission, error_message: &str)
where
    C: ConnectionTrait,
{
    match try_record(db, raw, error_message).await {
        Ok(row) => debug!(error_id = row.id, "Recorded rejected submission"),
        Err(e) => warn!(
            original_error = error_message,
            "Failed to record rejected submission: {e}"
        ),
    }
}

/// Retrieves every recorded error, oldest first.
pub async fn list_errors(db: &DatabaseConnection) -> Result<Vec<transaction_error::Model>> {
    use sea_orm::QueryOrder;

    crate::entities::TransactionError::find()
        .order_by_asc(transaction_error::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::json;

    #[tokio::test]
    async fn test_record_order_request() -> Result<()> {
        let db = setup_test_db().await?;
        let request = order_request("A@x.com", &[("Latte", 2)], "Bitcoin", "In-store");

        record(&db, &RawSubmission::from(&request), "Payment method not found: Bitcoin").await;

        let errors = list_errors(&db).await?;
        assert_eq!(errors.len(), 1);
        let row = &errors[0];
        assert_eq!(row.customer_email.as_deref(), Some("A@x.com"));
        assert_eq!(row.payment_method.as_deref(), Some("Bitcoin"));
        assert_eq!(row.location.as_deref(), Some("In-store"));
        assert_eq!(
            row.items.as_deref(),
            Some(r#"[{"item_name":"Latte","quantity":2}]"#)
        );
        assert_eq!(row.error_message, "Payment method not found: Bitcoin");
        Ok(())
    }

    #[test]
    fn test_raw_submission_from_malformed_json() {
        let body = json!({
            "customer_email": "a@x.com",
            "items": "not a list",
            "quantity": 3,
            "total_spent": 12.5,
            "location": null,
            "unexpected": true,
        });

        let raw = RawSubmission::from_json(&body);
        assert_eq!(raw.customer_email.as_deref(), Some("a@x.com"));
        assert_eq!(raw.items.as_deref(), Some("not a list"));
        assert_eq!(raw.quantity.as_deref(), Some("3"));
        assert_eq!(raw.total_spent.as_deref(), Some("12.5"));
        assert_eq!(raw.location, None);
        assert_eq!(raw.payment_method, None);
    }

    #[tokio::test]
    async fn test_record_failure_is_swallowed() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_exec_errors([sea_orm::DbErr::Custom("disk full".to_string())])
            .into_connection();

        let result = try_record(&db, &RawSubmission::default(), "boom").await;
        assert!(matches!(result, Err(Error::Recorder { .. })));

        // Does not panic or return anything
        record(&db, &RawSubmission::default(), "boom").await;
    }
}
