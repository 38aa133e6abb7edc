//! Maintenance - Wipes every table, used to reset a development database.

use crate::{
    entities::{
        Customer, Item, LegacyTransaction, PaymentMethod, Transaction, TransactionError,
        TransactionItem,
    },
    errors::Result,
};
use sea_orm::{
    DatabaseConnection, DatabaseTransaction, PaginatorTrait, TransactionTrait, prelude::*,
};
use tracing::{info, warn};

/// Rows removed from one table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableCount {
    /// Table name as created in the database
    pub table: String,
    /// Rows present when the truncation started
    pub rows_before: u64,
    /// Rows reported deleted by the `DELETE`
    pub rows_deleted: u64,
    /// Rows counted after the commit; anything but zero is reported
    pub rows_after: u64,
}

async fn truncate<E>(txn: &DatabaseTransaction, entity: E) -> Result<TableCount>
where
    E: EntityTrait,
    E::Model: Sync,
{
    let rows_before = E::find().count(txn).await?;
    let rows_deleted = E::delete_many().exec(txn).await?.rows_affected;
    Ok(TableCount {
        table: entity.table_name().to_string(),
        rows_before,
        rows_deleted,
        rows_after: 0,
    })
}

/// Deletes all rows from every table, children before parents, in one
/// database transaction.
///
/// # Errors
/// Returns a persistence error if any delete fails; nothing is removed then.
pub async fn truncate_all_tables(db: &DatabaseConnection) -> Result<Vec<TableCount>> {
    let txn = db.begin().await?;
    let mut report = vec![
        truncate(&txn, TransactionItem).await?,
        truncate(&txn, Transaction).await?,
        truncate(&txn, LegacyTransaction).await?,
        truncate(&txn, TransactionError).await?,
        truncate(&txn, Customer).await?,
        truncate(&txn, Item).await?,
        truncate(&txn, PaymentMethod).await?,
    ];
    txn.commit().await?;

    for (entry, rows_after) in report.iter_mut().zip([
        TransactionItem::find().count(db).await?,
        Transaction::find().count(db).await?,
        LegacyTransaction::find().count(db).await?,
        TransactionError::find().count(db).await?,
        Customer::find().count(db).await?,
        Item::find().count(db).await?,
        PaymentMethod::find().count(db).await?,
    ]) {
        entry.rows_after = rows_after;
        if rows_after == 0 {
            info!(
                table = %entry.table,
                deleted = entry.rows_deleted,
                "Truncated table"
            );
        } else {
            warn!(table = %entry.table, rows_after, "Table still has rows after truncation");
        }
    }

    Ok(report)
}
