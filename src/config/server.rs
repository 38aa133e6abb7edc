//! Server settings read from environment variables.
//!
//! Everything here has a default so the service starts with no `.env` file.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::errors::{Error, Result};

/// Used when `BIND_ADDRESS` is not set.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8000";

/// Used when `CATALOG_CONFIG` is not set.
pub const DEFAULT_CATALOG_PATH: &str = "config.toml";

/// Gets the socket address the HTTP server listens on from `BIND_ADDRESS`.
///
/// # Errors
/// Returns a configuration error if the value is not a valid socket address.
pub fn get_bind_address() -> Result<SocketAddr> {
    let raw = std::env::var("BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string());
    parse_bind_address(&raw)
}

fn parse_bind_address(raw: &str) -> Result<SocketAddr> {
    raw.parse().map_err(|e| Error::Config {
        message: format!("Invalid BIND_ADDRESS {raw:?}: {e}"),
    })
}

/// Gets the optional path of the historical CSV file from `CSV_FILE_PATH`.
#[must_use]
pub fn get_csv_file_path() -> Option<PathBuf> {
    std::env::var("CSV_FILE_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
}

/// Gets the catalog seed path from `CATALOG_CONFIG`.
#[must_use]
pub fn get_catalog_path() -> PathBuf {
    std::env::var("CATALOG_CONFIG")
        .map_or_else(|_| PathBuf::from(DEFAULT_CATALOG_PATH), PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bind_address() {
        let addr = parse_bind_address(DEFAULT_BIND_ADDRESS);
        assert!(matches!(addr, Ok(a) if a.port() == 8000));

        let bad = parse_bind_address("not an address");
        assert!(matches!(bad, Err(Error::Config { .. })));
    }
}
