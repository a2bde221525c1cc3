//! HTTP server for the analysis engine.
//!
//! One endpoint does the work: `POST /analyze` accepts the request contract
//! and returns either a validation/classification error or a complete,
//! decision-bearing response, never a partial success. `GET /health` lets
//! the upstream backend probe the engine before routing work to it.

use crate::models::AnalyzeRequest;
use crate::services::AnalysisService;
use crate::{Error, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Builds the router over a shared analysis service.
#[must_use]
pub fn router(service: Arc<AnalysisService>) -> Router {
    Router::new()
        .route("/analyze", post(analyze))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Binds and serves until shutdown.
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails.
pub async fn serve(service: Arc<AnalysisService>, port: u16) -> Result<()> {
    let app = router(service);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(port, "starting analysis HTTP server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::OperationFailed {
            operation: "bind".to_string(),
            cause: e.to_string(),
        })?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::OperationFailed {
            operation: "serve".to_string(),
            cause: e.to_string(),
        })
}

/// Health probe.
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Runs one request through the pipeline.
///
/// The pipeline is synchronous (embedding and generative calls block), so it
/// runs under `spawn_blocking`; the service itself is shared read-only and
/// holds no lock across model calls.
async fn analyze(
    State(service): State<Arc<AnalysisService>>,
    Json(request): Json<AnalyzeRequest>,
) -> Response {
    let result = tokio::task::spawn_blocking(move || service.analyze(&request)).await;

    match result {
        Ok(Ok(response)) => (StatusCode::OK, Json(response)).into_response(),
        Ok(Err(error)) => error_response(&error),
        Err(join_error) => {
            tracing::error!(error = %join_error, "analysis task panicked");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "analysis task failed" })),
            )
                .into_response()
        },
    }
}

/// Maps pipeline errors onto HTTP statuses.
///
/// Validation and classification failures are the client's to fix;
/// everything else is a server-side fault.
fn error_response(error: &Error) -> Response {
    let status = match error {
        Error::InvalidInput(_) | Error::Classification(_) => StatusCode::BAD_REQUEST,
        Error::OperationFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": error.to_string() }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        let response = error_response(&Error::InvalidInput("subject_name is required".into()));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = error_response(&Error::Classification("no syllabus".into()));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = error_response(&Error::OperationFailed {
            operation: "bind".to_string(),
            cause: "in use".to_string(),
        });
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
