//! Database operations for messages
//!
//! This module contains the message store: listing a conversation, creating
//! messages, the sent-to-seen status transition, and unread counting.

use chrono::Utc;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::model::{Message, MessageStatus};

fn message_from_row(row: &sqlx::postgres::PgRow) -> Message {
    Message {
        id: row.get("id"),
        sender_id: row.get("sender_id"),
        receiver_id: row.get("receiver_id"),
        text: row.get("text"),
        image: row.get("image_url"),
        status: MessageStatus::from_str(row.get::<String, _>("status").as_str())
            .unwrap_or(MessageStatus::Sent),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// List the full conversation between two users, oldest first
///
/// Returns messages sent in either direction between `user_id` and
/// `other_id`, ordered by creation time ascending.
pub async fn list_conversation(
    pool: &PgPool,
    user_id: Uuid,
    other_id: Uuid,
) -> Result<Vec<Message>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, sender_id, receiver_id, text, image_url, status, created_at, updated_at
        FROM messages
        WHERE (sender_id = $1 AND receiver_id = $2)
           OR (sender_id = $2 AND receiver_id = $1)
        ORDER BY created_at ASC
        "#,
    )
    .bind(user_id)
    .bind(other_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(message_from_row).collect())
}

/// Create a new message with status 'sent'
pub async fn create_message(
    pool: &PgPool,
    sender_id: Uuid,
    receiver_id: Uuid,
    text: Option<&str>,
    image_url: Option<&str>,
) -> Result<Message, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO messages (id, sender_id, receiver_id, text, image_url, status, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, 'sent', $6, $6)
        "#,
    )
    .bind(id)
    .bind(sender_id)
    .bind(receiver_id)
    .bind(text)
    .bind(image_url)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(Message {
        id,
        sender_id,
        receiver_id,
        text: text.map(|s| s.to_string()),
        image: image_url.map(|s| s.to_string()),
        status: MessageStatus::Sent,
        created_at: now,
        updated_at: now,
    })
}

/// Mark all 'sent' messages from `sender_id` to `receiver_id` as 'seen'
///
/// Only rows still in 'sent' are touched, so repeating the call is a no-op
/// and already-seen messages keep their original `updated_at`. Returns the
/// number of rows updated.
pub async fn mark_seen(
    pool: &PgPool,
    sender_id: Uuid,
    receiver_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let now = Utc::now();

    let result = sqlx::query(
        r#"
        UPDATE messages
        SET status = 'seen', updated_at = $1
        WHERE sender_id = $2 AND receiver_id = $3 AND status = 'sent'
        "#,
    )
    .bind(now)
    .bind(sender_id)
    .bind(receiver_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Count messages addressed to `user_id` that are still unread
///
/// The count is global across all senders.
pub async fn count_unread_for(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT COUNT(*) AS unread
        FROM messages
        WHERE receiver_id = $1 AND status = 'sent'
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(row.get("unread"))
}
