//! Unified error types and result handling.
//!
//! Every fallible operation in the crate returns [`Result`]. Business-rule
//! failures are explicit variants so callers can match on them; database
//! failures are wrapped in [`Error::Persistence`].

use sea_orm::DbErr;
use thiserror::Error;

/// Every failure the crate can report.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed, missing or inconsistent input
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The order references a payment method that is not in the catalog
    #[error("Payment method not found: {name}")]
    PaymentMethodNotFound { name: String },

    /// The order references an item name that is not in the catalog
    #[error("Item not found: {name}")]
    ItemNotFound { name: String },

    /// No committed transaction has this id
    #[error("Transaction not found: {id}")]
    TransactionNotFound { id: String },

    /// The store rejected or failed a read or write
    #[error("Persistence error: {0}")]
    Persistence(#[from] DbErr),

    /// Writing a diagnostic error row failed. Never returned to API callers.
    #[error("Error recorder failure: {message}")]
    Recorder { message: String },

    /// Invalid setting in the environment or the catalog file
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// File system or socket failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The legacy CSV file could not be read
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Coarse classification of an [`Error`], used by the API layer to pick a
/// response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller sent something unusable
    Validation,
    /// A referenced record does not exist
    NotFound,
    /// The database failed; nothing from the request was stored
    Persistence,
    /// Anything else
    Internal,
}

impl Error {
    /// Shorthand for building a [`Error::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Classifies the error for the API layer.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::PaymentMethodNotFound { .. }
            | Self::ItemNotFound { .. }
            | Self::TransactionNotFound { .. } => ErrorKind::NotFound,
            Self::Persistence(_) => ErrorKind::Persistence,
            Self::Recorder { .. } | Self::Config { .. } | Self::Io(_) | Self::Csv(_) => {
                ErrorKind::Internal
            }
        }
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
