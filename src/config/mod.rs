//! Configuration management for database, server and catalog settings.

/// Catalog seed loading from config.toml
pub mod catalog;

/// Database connection and table creation
pub mod database;

/// HTTP server and import settings from environment variables
pub mod server;

use crate::errors::Result;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Everything `main` needs to start the service.
#[derive(Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_address: SocketAddr,
    /// Historical CSV to import on startup, if any
    pub csv_file_path: Option<PathBuf>,
    pub catalog: catalog::CatalogSeed,
}

/// Reads the environment (after `.env` has been loaded) and the catalog file.
///
/// # Errors
/// Returns a configuration error when the bind address is invalid or the
/// catalog file exists but cannot be parsed.
pub fn load_app_configuration() -> Result<AppConfig> {
    let catalog_path = server::get_catalog_path();
    let config = AppConfig {
        database_url: database::get_database_url(),
        bind_address: server::get_bind_address()?,
        csv_file_path: server::get_csv_file_path(),
        catalog: catalog::load_catalog_seed_if_present(&catalog_path)?,
    };
    tracing::info!(
        bind_address = %config.bind_address,
        seed_items = config.catalog.items.len(),
        seed_payment_methods = config.catalog.payment_methods.len(),
        "Loaded application configuration"
    );
    Ok(config)
}
