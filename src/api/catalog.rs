//! Catalog endpoints: items, customers and payment methods.

use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::AppState,
    core::catalog::{self, NewCustomer, NewItem, NewPaymentMethod},
    entities::{customer, item, payment_method},
    errors::Result,
};

/// POST /items - add a price row for an item
pub async fn create_item(
    State(state): State<AppState>,
    Json(payload): Json<NewItem>,
) -> Result<(StatusCode, Json<item::Model>)> {
    let item = catalog::create_item(state.db(), payload).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /items
pub async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<item::Model>>> {
    Ok(Json(catalog::list_items(state.db()).await?))
}

/// POST /customers
pub async fn create_customer(
    State(state): State<AppState>,
    Json(payload): Json<NewCustomer>,
) -> Result<(StatusCode, Json<customer::Model>)> {
    let customer = catalog::create_customer(state.db(), payload).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// POST /payment_methods
pub async fn create_payment_method(
    State(state): State<AppState>,
    Json(payload): Json<NewPaymentMethod>,
) -> Result<(StatusCode, Json<payment_method::Model>)> {
    let method = catalog::create_payment_method(state.db(), payload).await?;
    Ok((StatusCode::CREATED, Json(method)))
}

/// GET /payment_methods
pub async fn list_payment_methods(
    State(state): State<AppState>,
) -> Result<Json<Vec<payment_method::Model>>> {
    Ok(Json(catalog::list_payment_methods(state.db()).await?))
}
