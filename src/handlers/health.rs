//! Health check handler

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde_json::json;

use crate::db;
use crate::handlers::AppState;

/// `GET /health` — reports store connectivity. Degraded state is a payload
/// field plus a 503, never a server error.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let connected = db::is_connected(&state.pool).await;

    let status = if connected {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = Json(json!({
        "status": if connected { "healthy" } else { "unhealthy" },
        "environment": state.config.environment.as_str(),
        "timestamp": Utc::now().to_rfc3339(),
        "database": if connected { "connected" } else { "disconnected" },
    }));

    (status, body)
}
