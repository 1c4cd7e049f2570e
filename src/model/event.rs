/**
 * Push Event Types
 *
 * This module defines the events delivered over a user's push channel.
 * Each event maps to a named SSE event with a JSON payload, matching the
 * client contract.
 */

use serde::Serialize;

use crate::model::message::Message;
use uuid::Uuid;

/// An event pushed to a connected user
#[derive(Debug, Clone, PartialEq)]
pub enum PushEvent {
    /// A new message addressed to the connected user
    NewMessage(Message),
    /// Messages the connected user sent to `user_id` were marked seen
    MessagesSeen {
        /// The user who saw the messages
        user_id: Uuid,
    },
}

impl PushEvent {
    /// The SSE event name for this event
    pub fn name(&self) -> &'static str {
        match self {
            PushEvent::NewMessage(_) => "newMessage",
            PushEvent::MessagesSeen { .. } => "messagesSeen",
        }
    }

    /// The JSON payload for this event
    pub fn payload(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            PushEvent::NewMessage(message) => serde_json::to_value(message),
            PushEvent::MessagesSeen { user_id } => Ok(serde_json::json!({
                "userId": user_id.to_string(),
            })),
        }
    }
}
