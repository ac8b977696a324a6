use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ledger::LedgerError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Converts our custom `AppError` into an HTTP response.
///
/// Unknown accounts and violated registration constraints are client errors
/// (400/404); anything else is a 500. Business-rule declines never reach this
/// type: they travel as a 200 payload with `success = false`.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Ledger(LedgerError::AccountNotFound(id)) => {
                (StatusCode::BAD_REQUEST, format!("Account {id} not found"))
            }
            AppError::Ledger(LedgerError::InvalidQuantity(q)) => (
                StatusCode::BAD_REQUEST,
                format!("Quantity must be at least 1, got {q}"),
            ),
            AppError::Ledger(ledger_err) => {
                tracing::error!(error = ?ledger_err, "Ledger error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred while executing the trade".to_string(),
                )
            }
            AppError::Store(store::StoreError::NotFound) => {
                (StatusCode::NOT_FOUND, "Not found".to_string())
            }
            AppError::Store(store_err) => (StatusCode::BAD_REQUEST, store_err.to_string()),
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),
        };

        let body = Json(json!({ "success": false, "message": message }));
        (status, body).into_response()
    }
}
