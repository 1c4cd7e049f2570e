/**
 * Conversation Service
 *
 * This module orchestrates the messaging flows: resolving contacts, reading
 * conversation history, sending messages (with optional image upload), the
 * seen transition, and unread counting. Handlers stay thin and delegate
 * here; the service owns the side-effect ordering.
 *
 * # Send Ordering
 *
 * `send` validates first, then uploads the image, then persists, then
 * pushes. An upload failure aborts the send with nothing persisted and no
 * push delivered.
 */

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::messaging::{contacts, store};
use crate::model::{Contact, Message, PushEvent, SendMessagePayload};
use crate::realtime::PushRegistry;
use crate::upload::ImageUploader;

/// Orchestrates messaging flows over the store, the push registry, and the
/// image upload collaborator
#[derive(Clone)]
pub struct ConversationService {
    db_pool: Option<PgPool>,
    registry: PushRegistry,
    uploader: Option<ImageUploader>,
}

impl ConversationService {
    pub fn new(
        db_pool: Option<PgPool>,
        registry: PushRegistry,
        uploader: Option<ImageUploader>,
    ) -> Self {
        Self {
            db_pool,
            registry,
            uploader,
        }
    }

    fn pool(&self) -> Result<&PgPool, AppError> {
        self.db_pool
            .as_ref()
            .ok_or_else(|| AppError::internal("message store unavailable"))
    }

    /// Resolve the contact list for a user
    pub async fn contacts(&self, user_id: Uuid) -> Result<Vec<Contact>, AppError> {
        let pool = self.pool()?;
        Ok(contacts::contacts_for_user(pool, user_id).await?)
    }

    /// Full conversation history between the requesting user and another
    /// user, oldest first
    pub async fn history(&self, user_id: Uuid, other_id: Uuid) -> Result<Vec<Message>, AppError> {
        let pool = self.pool()?;
        Ok(store::list_conversation(pool, user_id, other_id).await?)
    }

    /// Send a message, optionally uploading an attached image first
    ///
    /// The message must carry text, an image, or both. The stored message
    /// references the hosted image URL, never the raw upload data. After the
    /// message is persisted it is pushed to the receiver if they have an
    /// active channel.
    pub async fn send(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
        payload: &SendMessagePayload,
    ) -> Result<Message, AppError> {
        if payload.is_empty() {
            return Err(AppError::validation("message must have text or an image"));
        }

        let pool = self.pool()?;

        let image_url = match payload.image() {
            Some(image) => {
                let uploader = self
                    .uploader
                    .as_ref()
                    .ok_or_else(|| AppError::internal("image upload service not configured"))?;
                Some(uploader.upload(image).await?)
            }
            None => None,
        };

        let message = store::create_message(
            pool,
            sender_id,
            receiver_id,
            payload.text(),
            image_url.as_deref(),
        )
        .await?;

        let delivered = self
            .registry
            .deliver(receiver_id, PushEvent::NewMessage(message.clone()));
        tracing::debug!(
            "Message {} stored, push delivered to receiver: {}",
            message.id,
            delivered
        );

        Ok(message)
    }

    /// Mark all unread messages from `sender_id` to `user_id` as seen
    ///
    /// Notifies the sender over their push channel when anything changed.
    /// Returns the number of messages updated.
    pub async fn mark_seen(&self, user_id: Uuid, sender_id: Uuid) -> Result<u64, AppError> {
        let pool = self.pool()?;
        let updated = store::mark_seen(pool, sender_id, user_id).await?;

        if updated > 0 {
            self.registry
                .deliver(sender_id, PushEvent::MessagesSeen { user_id });
        }

        Ok(updated)
    }

    /// Count unread messages addressed to a user, across all senders
    pub async fn unread_count(&self, user_id: Uuid) -> Result<i64, AppError> {
        let pool = self.pool()?;
        Ok(store::count_unread_for(pool, user_id).await?)
    }
}
