//! Waitlist signup queries

use chrono::Utc;
use sqlx::SqlitePool;

use crate::types::{NewSignup, Signup};

/// Insert a new signup. A duplicate email surfaces as a database
/// unique-violation error; callers map it to a conflict.
pub async fn insert_signup(pool: &SqlitePool, new: &NewSignup) -> Result<Signup, sqlx::Error> {
    let signup = sqlx::query_as::<_, Signup>(
        r#"
        INSERT INTO waitlist (email, signup_date, ip_address, user_agent)
        VALUES (?, ?, ?, ?)
        RETURNING id, email, signup_date, ip_address, user_agent
        "#,
    )
    .bind(&new.email)
    .bind(Utc::now())
    .bind(&new.ip_address)
    .bind(&new.user_agent)
    .fetch_one(pool)
    .await?;

    Ok(signup)
}

/// Total number of signups.
pub async fn count_signups(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM waitlist")
        .fetch_one(pool)
        .await?;

    Ok(row.0)
}

/// List all signups, oldest first.
pub async fn list_signups(pool: &SqlitePool) -> Result<Vec<Signup>, sqlx::Error> {
    sqlx::query_as::<_, Signup>(
        r#"
        SELECT id, email, signup_date, ip_address, user_agent
        FROM waitlist
        ORDER BY id ASC
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Delete a signup by email. Returns the number of rows removed.
pub async fn delete_by_email(pool: &SqlitePool, email: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM waitlist WHERE email = ?")
        .bind(email)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Delete a signup by id. Returns the number of rows removed.
pub async fn delete_by_id(pool: &SqlitePool, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM waitlist WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
