//! Row and token fixtures
//!
//! Provides utilities for seeding users, connections, and messages, and for
//! minting tokens for test users.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use wirechat::auth::create_token;

/// A seeded test user with a valid bearer token
pub struct TestUser {
    pub id: Uuid,
    pub full_name: String,
    pub token: String,
}

/// Create a test user row and mint a token for it
pub async fn create_test_user(
    pool: &PgPool,
    full_name: &str,
) -> Result<TestUser, Box<dyn std::error::Error>> {
    let id = Uuid::new_v4();

    sqlx::query(
        "INSERT INTO users (id, full_name, photo_url, created_at) VALUES ($1, $2, $3, $4)",
    )
    .bind(id)
    .bind(full_name)
    .bind(format!("https://cdn.example.com/{}.png", id))
    .bind(Utc::now())
    .execute(pool)
    .await?;

    let token = create_token(id)?;

    Ok(TestUser {
        id,
        full_name: full_name.to_string(),
        token,
    })
}

/// Insert a connection row with the given status
pub async fn create_connection(
    pool: &PgPool,
    from_user_id: Uuid,
    to_user_id: Uuid,
    status: &str,
) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO connections (id, from_user_id, to_user_id, status, created_at)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(id)
    .bind(from_user_id)
    .bind(to_user_id)
    .bind(status)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(id)
}

/// Insert an accepted connection between two users
pub async fn create_accepted_connection(
    pool: &PgPool,
    from_user_id: Uuid,
    to_user_id: Uuid,
) -> Result<Uuid, sqlx::Error> {
    create_connection(pool, from_user_id, to_user_id, "accepted").await
}

/// Bearer header value for a test user's token
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
