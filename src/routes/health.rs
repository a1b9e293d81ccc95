use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub services: ServiceHealth,
}

#[derive(Serialize)]
pub struct ServiceHealth {
    pub rpc: String,
}

/// Health check endpoint - public
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthResponse>) {
    let rpc_result = state.rpc.health_check().await;

    if let Err(e) = &rpc_result {
        tracing::warn!(error = %e, "RPC endpoint health check failed");
    }

    // Nothing can be served without the database
    let (status, status_code) = if rpc_result.is_ok() {
        ("healthy", StatusCode::OK)
    } else {
        ("unhealthy", StatusCode::SERVICE_UNAVAILABLE)
    };

    (
        status_code,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            services: ServiceHealth {
                rpc: if rpc_result.is_ok() { "ok" } else { "error" }.to_string(),
            },
        }),
    )
}
