//! Stats handler

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;

use crate::db::queries;
use crate::error::ApiError;
use crate::handlers::AppState;

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    #[serde(rename = "totalSignups")]
    pub total_signups: i64,
    pub environment: &'static str,
}

/// `GET /api/stats` — total signup count. The shared-secret header is
/// enforced only outside development mode.
pub async fn stats(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<StatsResponse>, ApiError> {
    if !state.config.environment.is_development() {
        let provided = headers.get("x-api-key").and_then(|v| v.to_str().ok());
        if provided != Some(state.config.api_key.as_str()) {
            return Err(ApiError::Auth);
        }
    }

    let total = queries::signup::count_signups(&state.pool).await?;

    Ok(Json(StatsResponse {
        total_signups: total,
        environment: state.config.environment.as_str(),
    }))
}
