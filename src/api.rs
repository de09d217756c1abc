// 🌐 REST API - axum routes over the bank directory
//
// GET    /v1/swift-codes/:code           lookup by SWIFT code
// GET    /v1/swift-codes/country/:iso2   lookup by country
// POST   /v1/swift-codes                 register a bank
// DELETE /v1/swift-codes/:code           delete a bank
//
// Errors are returned as plain text, e.g. "Invalid SWIFT code: ...".

use crate::directory::BankDirectory;
use crate::dto::{BankRecord, CountrySummary, SwiftCodeSummary};
use crate::error::DirectoryError;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::{Arc, Mutex, MutexGuard};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub type SharedDirectory = Arc<Mutex<BankDirectory>>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub directory: SharedDirectory,
}

impl AppState {
    pub fn new(directory: BankDirectory) -> Self {
        Self {
            directory: Arc::new(Mutex::new(directory)),
        }
    }

    /// A panic in another handler must not take the whole directory down
    fn lock(&self) -> MutexGuard<'_, BankDirectory> {
        self.directory
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DirectoryError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DirectoryError::InvalidSwiftCode(_)
            | DirectoryError::InvalidIso2Code(_)
            | DirectoryError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            DirectoryError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DirectoryError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_client_error() {
            tracing::warn!(status = status.as_u16(), "{}", self);
        } else {
            tracing::error!(status = status.as_u16(), "{}", self);
        }

        (status, self.to_string()).into_response()
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /health - Health check
async fn health_check() -> &'static str {
    "OK"
}

/// GET /v1/swift-codes/:code
async fn get_by_code(
    State(state): State<AppState>,
    Path(swift_code): Path<String>,
) -> Result<Json<SwiftCodeSummary>, DirectoryError> {
    let summary = state.lock().get_by_code(&swift_code)?;
    Ok(Json(summary))
}

/// GET /v1/swift-codes/country/:iso2
async fn get_by_country(
    State(state): State<AppState>,
    Path(iso2): Path<String>,
) -> Result<Json<CountrySummary>, DirectoryError> {
    let summary = state.lock().get_by_country(&iso2)?;
    Ok(Json(summary))
}

/// POST /v1/swift-codes
///
/// Every body rejection (syntax, missing field, wrong type, content type)
/// is a 400, never axum's default 415/422.
async fn register_bank(
    State(state): State<AppState>,
    body: std::result::Result<Json<BankRecord>, JsonRejection>,
) -> Result<String, DirectoryError> {
    let Json(record) =
        body.map_err(|rejection| DirectoryError::InvalidRequest(rejection.body_text()))?;
    state.lock().register(&record)
}

/// DELETE /v1/swift-codes/:code
async fn delete_bank(
    State(state): State<AppState>,
    Path(swift_code): Path<String>,
) -> Result<String, DirectoryError> {
    state.lock().delete(&swift_code)
}

// ============================================================================
// Router
// ============================================================================

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/v1/swift-codes", post(register_bank))
        .route(
            "/v1/swift-codes/:code",
            get(get_by_code).delete(delete_bank),
        )
        .route("/v1/swift-codes/country/:iso2", get(get_by_country))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            DirectoryError::invalid_swift_code("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            DirectoryError::invalid_iso2_code("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            DirectoryError::not_found("x").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            DirectoryError::InvalidRequest("x".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            DirectoryError::from(rusqlite::Error::InvalidQuery).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
