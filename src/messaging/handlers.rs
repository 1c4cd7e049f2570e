//! Messaging HTTP Handlers
//!
//! This module contains the HTTP handlers for the chat endpoints. Handlers
//! stay thin: extract the authenticated user and path parameters, delegate
//! to the conversation service, shape the response envelope.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::messaging::service::ConversationService;
use crate::middleware::auth::AuthUser;
use crate::model::{Contact, Message};

/// Envelope for the contact list response
#[derive(Debug, Serialize)]
pub struct ContactsResponse {
    pub message: String,
    pub data: ContactsData,
}

/// Inner payload of the contact list response
#[derive(Debug, Serialize)]
pub struct ContactsData {
    pub length: usize,
    pub data: Vec<Contact>,
}

/// Response after marking a conversation as seen
#[derive(Debug, Serialize)]
pub struct MarkSeenResponse {
    pub message: String,
    #[serde(rename = "updatedCount")]
    pub updated_count: u64,
}

/// Response for the unread counter
#[derive(Debug, Serialize)]
pub struct UnreadCountResponse {
    #[serde(rename = "unreadCount")]
    pub unread_count: i64,
}

/// Get the authenticated user's contacts (GET /connections)
pub async fn get_contacts(
    State(service): State<ConversationService>,
    AuthUser(user): AuthUser,
) -> Result<Json<ContactsResponse>, AppError> {
    let contacts = service.contacts(user.user_id).await?;

    Ok(Json(ContactsResponse {
        message: "data fetched successfully".to_string(),
        data: ContactsData {
            length: contacts.len(),
            data: contacts,
        },
    }))
}

/// Get the conversation with another user (GET /{id})
pub async fn get_conversation(
    State(service): State<ConversationService>,
    AuthUser(user): AuthUser,
    Path(other_id): Path<Uuid>,
) -> Result<Json<Vec<Message>>, AppError> {
    let messages = service.history(user.user_id, other_id).await?;
    Ok(Json(messages))
}

/// Send a message to another user (POST /send/{id})
///
/// Responds 201 with the stored message.
pub async fn send_message(
    State(service): State<ConversationService>,
    AuthUser(user): AuthUser,
    Path(receiver_id): Path<Uuid>,
    Json(payload): Json<crate::model::SendMessagePayload>,
) -> Result<(StatusCode, Json<Message>), AppError> {
    let message = service.send(user.user_id, receiver_id, &payload).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// Mark messages from another user as seen (PUT /seen/{id})
pub async fn mark_seen(
    State(service): State<ConversationService>,
    AuthUser(user): AuthUser,
    Path(sender_id): Path<Uuid>,
) -> Result<Json<MarkSeenResponse>, AppError> {
    let updated_count = service.mark_seen(user.user_id, sender_id).await?;

    Ok(Json(MarkSeenResponse {
        message: "Messages marked as seen".to_string(),
        updated_count,
    }))
}

/// Get the authenticated user's unread message count (GET /unread-count)
pub async fn get_unread_count(
    State(service): State<ConversationService>,
    AuthUser(user): AuthUser,
) -> Result<Json<UnreadCountResponse>, AppError> {
    let unread_count = service.unread_count(user.user_id).await?;
    Ok(Json(UnreadCountResponse { unread_count }))
}
