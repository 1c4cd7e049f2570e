//! Message Data Structure
//!
//! Represents chat messages exchanged between two users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Delivery status of a message
///
/// A message starts as `Sent` and moves to `Seen` exactly once, when the
/// receiver marks the conversation as seen. It never moves back.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    /// Delivered to the store, not yet seen by the receiver
    Sent,
    /// Seen by the receiver
    Seen,
}

impl Default for MessageStatus {
    fn default() -> Self {
        MessageStatus::Sent
    }
}

impl MessageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageStatus::Sent => "sent",
            MessageStatus::Seen => "seen",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sent" => Some(MessageStatus::Sent),
            "seen" => Some(MessageStatus::Seen),
            _ => None,
        }
    }
}

/// A chat message between two users
///
/// Wire names are camelCase to match the client contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique message ID
    pub id: Uuid,
    /// User who sent the message
    pub sender_id: Uuid,
    /// User the message was sent to
    pub receiver_id: Uuid,
    /// Message text, if any
    pub text: Option<String>,
    /// Hosted image URL, if any
    pub image: Option<String>,
    /// Current delivery status
    #[serde(default)]
    pub status: MessageStatus,
    /// When the message was created
    pub created_at: DateTime<Utc>,
    /// When the message was last updated (status transitions)
    pub updated_at: DateTime<Utc>,
}

/// Request body for sending a message
///
/// Both fields are optional on the wire, but at least one of them must be
/// non-empty for the request to be accepted.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SendMessagePayload {
    /// Message text
    pub text: Option<String>,
    /// Image as a base64 data URI, uploaded before the message is stored
    pub image: Option<String>,
}

impl SendMessagePayload {
    /// Message text with empty strings treated as absent
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Image data with empty strings treated as absent
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref().filter(|s| !s.is_empty())
    }

    /// Whether the payload carries neither text nor image
    pub fn is_empty(&self) -> bool {
        self.text().is_none() && self.image().is_none()
    }
}
