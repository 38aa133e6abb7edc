//! Legacy import - Loads historical single-line sales from a CSV export.
//!
//! The historical file predates the order workflow and contains malformed
//! values, so rows are stored verbatim as text in `transactions_static`. Rows
//! that cannot be stored at all (unreadable, no transaction id, repeated id)
//! are written to `transactions_errors` instead. The whole import runs in one
//! database transaction.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use csv::ByteRecord;

use crate::{
    core::recorder::{self, RawSubmission},
    entities::{LegacyTransaction, legacy_transaction},
    errors::Result,
};
use sea_orm::{DatabaseConnection, PaginatorTrait, Set, TransactionTrait, prelude::*};
use serde::Deserialize;
use tracing::{info, instrument, warn};

/// Rows per multi-row insert, kept well under `SQLite`'s bound-parameter limit
const INSERT_BATCH_SIZE: usize = 100;

/// One row of the historical export, column names as in the file.
#[derive(Debug, Default, Deserialize)]
struct LegacyCsvRow {
    #[serde(rename = "Transaction ID", default)]
    transaction_id: Option<String>,
    #[serde(rename = "Item", default)]
    item: Option<String>,
    #[serde(rename = "Quantity", default)]
    quantity: Option<String>,
    #[serde(rename = "Price Per Unit", default)]
    price_per_unit: Option<String>,
    #[serde(rename = "Total Spent", default)]
    total_spent: Option<String>,
    #[serde(rename = "Payment Method", default)]
    payment_method: Option<String>,
    #[serde(rename = "Location", default)]
    location: Option<String>,
    #[serde(rename = "Transaction Date", default)]
    transaction_date: Option<String>,
}

impl LegacyCsvRow {
    /// Best-effort copy of a row that failed to decode, invalid UTF-8
    /// replaced with U+FFFD.
    fn from_lossy(headers: &ByteRecord, record: &ByteRecord) -> Self {
        let mut row = Self::default();
        for (header, value) in headers.iter().zip(record.iter()) {
            if value.is_empty() {
                continue;
            }
            let value = Some(String::from_utf8_lossy(value).into_owned());
            match header {
                b"Transaction ID" => row.transaction_id = value,
                b"Item" => row.item = value,
                b"Quantity" => row.quantity = value,
                b"Price Per Unit" => row.price_per_unit = value,
                b"Total Spent" => row.total_spent = value,
                b"Payment Method" => row.payment_method = value,
                b"Location" => row.location = value,
                b"Transaction Date" => row.transaction_date = value,
                _ => {}
            }
        }
        row
    }
}

impl From<&LegacyCsvRow> for RawSubmission {
    fn from(row: &LegacyCsvRow) -> Self {
        Self {
            transaction_id: row.transaction_id.clone(),
            item: row.item.clone(),
            quantity: row.quantity.clone(),
            price_per_unit: row.price_per_unit.clone(),
            total_spent: row.total_spent.clone(),
            payment_method: row.payment_method.clone(),
            location: row.location.clone(),
            transaction_date: row.transaction_date.clone(),
            ..Self::default()
        }
    }
}

/// Outcome of an import run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Rows stored in `transactions_static`
    pub imported: usize,
    /// Rows written to `transactions_errors`
    pub rejected: usize,
    /// The legacy table already had data, nothing was read
    pub skipped: bool,
}

/// Imports the CSV file at `path` unless legacy rows already exist.
///
/// # Errors
/// Returns an error if the file cannot be opened or a database write fails.
#[instrument(skip(db))]
pub async fn import_legacy_csv_file(db: &DatabaseConnection, path: &Path) -> Result<ImportSummary> {
    if LegacyTransaction::find().count(db).await? > 0 {
        info!("Legacy transactions already exist, skipping CSV import");
        return Ok(ImportSummary {
            skipped: true,
            ..ImportSummary::default()
        });
    }

    let file = std::fs::File::open(path)?;
    import_legacy_csv(db, file).await
}

/// Imports every row of a CSV stream.
///
/// # Errors
/// Returns an error if the header row cannot be read or a database write
/// fails; in the latter case nothing from this run is kept.
pub async fn import_legacy_csv<R: Read>(db: &DatabaseConnection, reader: R) -> Result<ImportSummary> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.byte_headers()?.clone();

    let mut accepted = Vec::new();
    let mut rejected = Vec::new();
    let mut seen_ids = HashSet::new();

    for (index, record) in csv_reader.byte_records().enumerate() {
        // Header is line 1
        let line = index + 2;
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                rejected.push((RawSubmission::default(), format!("Line {line}: {e}")));
                continue;
            }
        };
        let row = match record.deserialize::<LegacyCsvRow>(Some(&headers)) {
            Ok(row) => row,
            Err(e) => {
                let lossy = LegacyCsvRow::from_lossy(&headers, &record);
                rejected.push((RawSubmission::from(&lossy), format!("Line {line}: {e}")));
                continue;
            }
        };

        match row.transaction_id.clone() {
            None => rejected.push((
                RawSubmission::from(&row),
                format!("Line {line}: missing transaction id"),
            )),
            Some(id) if !seen_ids.insert(id.clone()) => rejected.push((
                RawSubmission::from(&row),
                format!("Line {line}: duplicate transaction id {id}"),
            )),
            Some(id) => accepted.push(legacy_transaction::ActiveModel {
                transaction_id: Set(id),
                item: Set(row.item),
                quantity: Set(row.quantity),
                price_per_unit: Set(row.price_per_unit),
                total_spent: Set(row.total_spent),
                payment_method: Set(row.payment_method),
                location: Set(row.location),
                transaction_date: Set(row.transaction_date),
            }),
        }
    }

    let summary = ImportSummary {
        imported: accepted.len(),
        rejected: rejected.len(),
        skipped: false,
    };

    let txn = db.begin().await?;
    let mut remaining = accepted.into_iter().peekable();
    while remaining.peek().is_some() {
        let batch: Vec<_> = remaining.by_ref().take(INSERT_BATCH_SIZE).collect();
        LegacyTransaction::insert_many(batch).exec(&txn).await?;
    }
    for (raw, message) in &rejected {
        warn!("Rejected legacy row: {message}");
        recorder::try_record(&txn, raw, message).await?;
    }
    txn.commit().await?;

    info!(
        imported = summary.imported,
        rejected = summary.rejected,
        "Imported legacy transactions"
    );
    Ok(summary)
}
