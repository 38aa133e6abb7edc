//! Empties every table in the configured database.
//!
//! Reads `DATABASE_URL` the same way the server does. Intended for resetting
//! development and demo databases.

use cafe_pos::{config::database, core::maintenance, errors::Result};
use dotenvy::dotenv;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    dotenv().ok();

    let database_url = database::get_database_url();
    let db = database::create_connection(&database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db).await?;

    let report = maintenance::truncate_all_tables(&db).await?;
    for table in &report {
        if table.rows_after == 0 {
            info!(
                "{}: {} rows before, {} deleted",
                table.table, table.rows_before, table.rows_deleted
            );
        } else {
            warn!("{}: {} rows remain after truncation", table.table, table.rows_after);
        }
    }

    Ok(())
}
