//! Catalog seed loading from config.toml
//!
//! The menu items and payment methods listed in the catalog file are inserted
//! on startup when they are missing from the database. This keeps a fresh
//! deployment usable without calling the create endpoints by hand.

use crate::errors::{Error, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire catalog file
#[derive(Debug, Default, Deserialize)]
pub struct CatalogSeed {
    /// Menu items to seed
    #[serde(default)]
    pub items: Vec<ItemSeed>,
    /// Payment methods to seed
    #[serde(default)]
    pub payment_methods: Vec<PaymentMethodSeed>,
}

/// A single menu item and its starting price
#[derive(Debug, Deserialize, Clone)]
pub struct ItemSeed {
    pub name: String,
    pub unit_price: Decimal,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PaymentMethodSeed {
    pub name: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}

/// Loads the catalog seed from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_catalog_seed<P: AsRef<Path>>(path: P) -> Result<CatalogSeed> {
    let path = path.as_ref();
    tracing::debug!("Attempting to load catalog seed from: {:?}", path);
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read catalog file {}: {e}", path.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse catalog file {}: {e}", path.display()),
    })
}

/// Loads the catalog seed if the file exists, or returns an empty seed.
pub fn load_catalog_seed_if_present<P: AsRef<Path>>(path: P) -> Result<CatalogSeed> {
    if path.as_ref().exists() {
        load_catalog_seed(path)
    } else {
        tracing::info!(
            "No catalog file at {}, skipping catalog seed",
            path.as_ref().display()
        );
        Ok(CatalogSeed::default())
    }
}
