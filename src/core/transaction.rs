//! Transaction queries - Read access to committed orders.
//!
//! Every query returns the transaction header together with its line items.

use crate::{
    entities::{Transaction, TransactionItem, transaction, transaction_item},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, prelude::*};
use serde::Serialize;

/// A transaction header and its line items.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TransactionWithItems {
    #[serde(flatten)]
    pub transaction: transaction::Model,
    pub items: Vec<transaction_item::Model>,
}

impl From<(transaction::Model, Vec<transaction_item::Model>)> for TransactionWithItems {
    fn from((transaction, items): (transaction::Model, Vec<transaction_item::Model>)) -> Self {
        Self { transaction, items }
    }
}

/// Retrieves all transactions, newest first.
pub async fn list_transactions(db: &DatabaseConnection) -> Result<Vec<TransactionWithItems>> {
    let rows = Transaction::find()
        .order_by_desc(transaction::Column::CreatedAt)
        .order_by_asc(transaction::Column::TransactionId)
        .find_with_related(TransactionItem)
        .all(db)
        .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn count_transactions(db: &DatabaseConnection) -> Result<u64> {
    Transaction::find().count(db).await.map_err(Into::into)
}

/// Retrieves one transaction by id.
///
/// # Errors
/// Returns [`Error::TransactionNotFound`] if no transaction has this id.
pub async fn get_transaction(
    db: &DatabaseConnection,
    transaction_id: &str,
) -> Result<TransactionWithItems> {
    let header = Transaction::find_by_id(transaction_id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| Error::TransactionNotFound {
            id: transaction_id.to_string(),
        })?;
    let items = header
        .find_related(TransactionItem)
        .order_by_asc(transaction_item::Column::ItemId)
        .all(db)
        .await?;
    Ok(TransactionWithItems {
        transaction: header,
        items,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use rust_decimal::Decimal;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_list_and_count() -> Result<()> {
        let (db, _) = setup_with_catalog().await?;
        assert_eq!(count_transactions(&db).await?, 0);
        assert!(list_transactions(&db).await?.is_empty());

        submit_test_order(&db, "a@x.com", &[("Latte", 1), ("Cookie", 2)]).await?;
        submit_test_order(&db, "b@x.com", &[("Latte", 3)]).await?;

        assert_eq!(count_transactions(&db).await?, 2);
        let all = list_transactions(&db).await?;
        assert_eq!(all.len(), 2);
        let line_counts: Vec<usize> = all.iter().map(|t| t.items.len()).collect();
        assert!(line_counts.contains(&1) && line_counts.contains(&2));
        Ok(())
    }

    #[tokio::test]
    async fn test_get_transaction() -> Result<()> {
        let (db, fixture) = setup_with_catalog().await?;
        let committed = submit_test_order(&db, "a@x.com", &[("Latte", 2)]).await?;

        let found = get_transaction(&db, &committed.transaction.transaction_id).await?;
        assert_eq!(found, committed);
        assert_eq!(found.items[0].item_id, fixture.latte.item_id);
        assert_eq!(found.items[0].subtotal, Decimal::new(900, 2));
        Ok(())
    }

    #[tokio::test]
    async fn test_get_transaction_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([Vec::<transaction::Model>::new()])
            .into_connection();

        let result = get_transaction(&db, "0123456789abcdef").await;
        assert!(matches!(
            result,
            Err(Error::TransactionNotFound { id }) if id == "0123456789abcdef"
        ));
    }
}
