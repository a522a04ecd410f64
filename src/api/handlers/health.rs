//! Health check handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};

use crate::api::state::AppState;

/// Liveness probe - always returns 200 if the service is running.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness probe - checks if the store can serve requests.
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let storage_ok = state.storage.health_check().await.is_ok();

    let status_code = if storage_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = Json(json!({
        "ready": storage_ok,
        "components": {
            "storage": {
                "backend": state.storage.backend_name(),
                "healthy": storage_ok
            }
        }
    }));

    (status_code, response)
}

/// Prometheus metrics endpoint.
///
/// Without an installed recorder only the liveness gauge is reported.
pub async fn metrics(State(state): State<AppState>) -> String {
    if let Some(handle) = &state.metrics {
        return handle.render();
    }

    let mut output = String::new();

    output.push_str("# HELP subjects_api_up Whether the service is up\n");
    output.push_str("# TYPE subjects_api_up gauge\n");
    output.push_str("subjects_api_up 1\n");

    output
}
