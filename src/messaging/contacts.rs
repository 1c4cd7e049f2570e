//! Contact resolution
//!
//! A user's contacts are the counterparts of their accepted connections,
//! regardless of which side initiated. Duplicate accepted rows between the
//! same pair are tolerated in the store; resolution de-duplicates by
//! counterpart ID, first-seen order winning.

use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::model::{Connection, ConnectionStatus, Contact};

/// Get all accepted connections touching a user, oldest first
pub async fn accepted_connections_for(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<Connection>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, from_user_id, to_user_id, status, created_at
        FROM connections
        WHERE status = 'accepted' AND (from_user_id = $1 OR to_user_id = $1)
        ORDER BY created_at ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| Connection {
            id: row.get("id"),
            from_user_id: row.get("from_user_id"),
            to_user_id: row.get("to_user_id"),
            status: ConnectionStatus::from_str(row.get::<String, _>("status").as_str())
                .unwrap_or(ConnectionStatus::Pending),
            created_at: row.get("created_at"),
        })
        .collect())
}

/// Unique counterpart IDs of `user_id` across its connections
///
/// Preserves first-seen order and drops duplicates, including rows where the
/// same pair was accepted more than once.
pub fn counterpart_ids(connections: &[Connection], user_id: Uuid) -> Vec<Uuid> {
    let mut seen = Vec::new();
    for connection in connections {
        if let Some(counterpart) = connection.counterpart_of(user_id) {
            if !seen.contains(&counterpart) {
                seen.push(counterpart);
            }
        }
    }
    seen
}

/// Load the safe contact projection for a set of user IDs
///
/// Results are re-ordered to match the input order, so first-seen connection
/// order survives the database round trip.
pub async fn load_contacts(pool: &PgPool, ids: &[Uuid]) -> Result<Vec<Contact>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows = sqlx::query(
        r#"
        SELECT id, full_name, photo_url
        FROM users
        WHERE id = ANY($1)
        "#,
    )
    .bind(ids)
    .fetch_all(pool)
    .await?;

    let mut loaded: Vec<Contact> = rows
        .into_iter()
        .map(|row| Contact {
            id: row.get("id"),
            full_name: row.get("full_name"),
            photo_url: row.get("photo_url"),
        })
        .collect();

    loaded.sort_by_key(|contact| ids.iter().position(|id| *id == contact.id));
    Ok(loaded)
}

/// Resolve the contact list for a user
pub async fn contacts_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Contact>, sqlx::Error> {
    let connections = accepted_connections_for(pool, user_id).await?;
    let ids = counterpart_ids(&connections, user_id);
    load_contacts(pool, &ids).await
}
