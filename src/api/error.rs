//! Maps [`Error`] to HTTP responses.
//!
//! | Kind | Status |
//! |------|--------|
//! | Validation | 422 |
//! | Not found | 404 |
//! | Persistence | 500, generic message |
//! | Internal | 500 |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use crate::errors::{Error, ErrorKind};

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, detail) = match self.kind() {
            ErrorKind::Validation => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ErrorKind::Persistence => {
                error!("Persistence failure: {self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Could not save the request, nothing was stored. Please retry.".to_string(),
                )
            }
            ErrorKind::Internal => {
                error!("Internal error: {self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
