//! Waitlist signup types

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One waitlist registration record. Rows are created by the submission
/// handler, never updated, and deleted only via the admin CLI.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Signup {
    pub id: i64,
    pub email: String,
    pub signup_date: DateTime<Utc>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Insert payload for a new signup.
#[derive(Debug, Clone)]
pub struct NewSignup {
    pub email: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}
