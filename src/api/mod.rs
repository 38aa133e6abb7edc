//! HTTP interface - axum router over the core operations.
//!
//! Handlers are thin: they extract the request, call into [`crate::core`] and
//! map the result. Error-to-status mapping lives in [`error`].

/// Catalog endpoints (items, customers, payment methods)
pub mod catalog;
/// Error to HTTP response mapping
pub mod error;
/// Order submission and transaction queries
pub mod transactions;

use axum::{
    Router,
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared data available to all handlers.
///
/// Cloned once per request by axum, so the connection sits behind an [`Arc`].
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for all database operations
    pub database: Arc<DatabaseConnection>,
}

impl AppState {
    /// Wraps a shared connection.
    #[must_use]
    pub const fn new(database: Arc<DatabaseConnection>) -> Self {
        Self { database }
    }

    /// Borrows the connection for calls into [`crate::core`].
    #[must_use]
    pub fn db(&self) -> &DatabaseConnection {
        self.database.as_ref()
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/transactions",
            get(transactions::list).post(transactions::create),
        )
        .route("/transactions/count", get(transactions::count))
        .route("/transactions/{transaction_id}", get(transactions::get_by_id))
        .route("/items", get(catalog::list_items).post(catalog::create_item))
        .route("/customers", post(catalog::create_customer))
        .route(
            "/payment_methods",
            get(catalog::list_payment_methods).post(catalog::create_payment_method),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
