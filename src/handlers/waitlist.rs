//! Waitlist submission handler

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::db::queries;
use crate::error::ApiError;
use crate::handlers::AppState;
use crate::types::NewSignup;

const MAX_EMAIL_LENGTH: usize = 255;

#[derive(Debug, Deserialize)]
pub struct WaitlistRequest {
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WaitlistResponse {
    message: String,
}

/// `POST /api/waitlist` — validate and store one signup.
///
/// Order matters: the rate-limit check runs before validation, so invalid
/// submissions still count against the client's window. The body is parsed
/// by hand so a missing field or unparseable JSON lands in the same 400
/// path as a bad address instead of an extractor rejection.
pub async fn submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WaitlistResponse>, ApiError> {
    let client_key = client_ip(&headers);
    if !state.limiter.check(&client_key) {
        return Err(ApiError::RateLimited);
    }

    let email = serde_json::from_slice::<WaitlistRequest>(&body)
        .ok()
        .and_then(|req| req.email)
        .unwrap_or_default();

    validate_email(&email)?;

    let new = NewSignup {
        email,
        ip_address: Some(client_key).filter(|ip| ip.as_str() != "unknown"),
        user_agent: headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    };

    let signup = queries::signup::insert_signup(&state.pool, &new).await?;
    info!("New signup #{}: {}", signup.id, signup.email);

    Ok(Json(WaitlistResponse {
        message: "Successfully joined waitlist!".to_string(),
    }))
}

/// Deliberately permissive check (`@` plus a length cap). A stricter
/// grammar could reject addresses that were accepted before.
fn validate_email(email: &str) -> Result<(), ApiError> {
    if email.is_empty() || !email.contains('@') || email.len() > MAX_EMAIL_LENGTH {
        return Err(ApiError::Validation("Invalid email format".to_string()));
    }
    Ok(())
}

/// Client identifier for rate limiting: first proxy-forwarded address,
/// falling back to "unknown" when no proxy header is present.
pub(crate) fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .or_else(|| headers.get("x-real-ip"))
        .and_then(|v| v.to_str().ok())
        .map(|s| s.split(',').next().unwrap_or(s).trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
