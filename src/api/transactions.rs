//! Transaction endpoints.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::Value;
use tracing::warn;

use crate::{
    api::AppState,
    core::{
        order::OrderRequest,
        recorder::{self, RawSubmission},
        submission,
        transaction::{self, TransactionWithItems},
    },
    errors::{Error, Result},
};

/// POST /transactions - submit an order
///
/// The body is parsed by hand rather than with the `Json` extractor so that a
/// malformed submission can still be recorded field by field.
pub async fn create(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<TransactionWithItems>)> {
    let request = match serde_json::from_slice::<OrderRequest>(&body) {
        Ok(request) => request,
        Err(e) => {
            let message = format!("Invalid order request: {e}");
            warn!("{message}");
            let raw = serde_json::from_slice::<Value>(&body)
                .map(|value| RawSubmission::from_json(&value))
                .unwrap_or_default();
            recorder::record(state.db(), &raw, &message).await;
            return Err(Error::validation(message));
        }
    };

    let committed = submission::submit_order(state.db(), request).await?;
    Ok((StatusCode::CREATED, Json(committed)))
}

/// GET /transactions
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<TransactionWithItems>>> {
    Ok(Json(transaction::list_transactions(state.db()).await?))
}

/// GET /transactions/count
pub async fn count(State(state): State<AppState>) -> Result<Json<u64>> {
    Ok(Json(transaction::count_transactions(state.db()).await?))
}

/// GET /transactions/{transaction_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(transaction_id): Path<String>,
) -> Result<Json<TransactionWithItems>> {
    Ok(Json(
        transaction::get_transaction(state.db(), &transaction_id).await?,
    ))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use crate::api::{AppState, router};
    use crate::core::recorder::list_errors;
    use crate::test_utils::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_fetch_transaction() {
        let (db, _) = setup_with_catalog().await.unwrap();
        let app = router(AppState::new(Arc::new(db)));

        let order = json!({
            "customer_email": "A@x.com",
            "items": [{"item_name": "Latte", "quantity": 2}],
            "payment_method": "Cash",
            "location": "In-store",
        });
        let (status, created) = send(app.clone(), post_json("/transactions", &order.to_string())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["status"], "completed");
        assert_eq!(created["location"], "In-store");
        assert_eq!(created["items"][0]["quantity"], 2);
        let total: rust_decimal::Decimal = created["total_spent"].as_str().unwrap().parse().unwrap();
        assert_eq!(total, rust_decimal::Decimal::new(900, 2));

        let id = created["transaction_id"].as_str().unwrap();
        let uri = format!("/transactions/{id}");
        let (status, fetched) = send(app.clone(), Request::get(uri).body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["transaction_id"], created["transaction_id"]);
        assert_eq!(fetched["customer_id"], created["customer_id"]);
        assert_eq!(fetched["items"], created["items"]);

        let (status, count) = send(
            app.clone(),
            Request::get("/transactions/count").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(count, json!(1));

        let (_, all) = send(app, Request::get("/transactions").body(Body::empty()).unwrap()).await;
        assert_eq!(all.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_payment_method_is_404_and_recorded() {
        let (db, _) = setup_with_catalog().await.unwrap();
        let db = Arc::new(db);
        let app = router(AppState::new(Arc::clone(&db)));

        let order = json!({
            "customer_email": "A@x.com",
            "items": [{"item_name": "Latte", "quantity": 2}],
            "payment_method": "Bitcoin",
            "location": "In-store",
        });
        let (status, body) = send(app, post_json("/transactions", &order.to_string())).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Payment method not found: Bitcoin");
        assert_eq!(list_errors(&db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_body_is_recorded_as_text() {
        let (db, _) = setup_with_catalog().await.unwrap();
        let db = Arc::new(db);
        let app = router(AppState::new(Arc::clone(&db)));

        // quantity is a string and payment_method is missing
        let body = r#"{"customer_email":"a@x.com","items":[{"item_name":"Latte","quantity":"two"}],"location":"In-store"}"#;
        let (status, response) = send(app, post_json("/transactions", body)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(response["detail"].as_str().unwrap().starts_with("Validation error: Invalid order request"));

        let errors = list_errors(&db).await.unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].customer_email.as_deref(), Some("a@x.com"));
        assert_eq!(
            errors[0].items.as_deref(),
            Some(r#"[{"item_name":"Latte","quantity":"two"}]"#)
        );
        assert_eq!(errors[0].payment_method, None);
    }

    #[tokio::test]
    async fn test_non_json_body_is_still_recorded() {
        let (db, _) = setup_with_catalog().await.unwrap();
        let db = Arc::new(db);
        let app = router(AppState::new(Arc::clone(&db)));

        let (status, _) = send(app, post_json("/transactions", "not json")).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let errors = list_errors(&db).await.unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].customer_email, None);
    }

    #[tokio::test]
    async fn test_missing_transaction_is_404() {
        let db = setup_test_db().await.unwrap();
        let app = router(AppState::new(Arc::new(db)));

        let (status, body) = send(
            app,
            Request::get("/transactions/ffffffffffffffff")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Transaction not found: ffffffffffffffff");
    }
}
