/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct serves as the central state container for the
 * application, holding:
 * - The conversation service (store access, push delivery, uploads)
 * - The push channel registry
 * - The optional database connection pool
 *
 * # State Extraction
 *
 * The `FromRef` implementations allow Axum handlers to extract specific
 * parts of the state without needing the entire `AppState`.
 */

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::messaging::service::ConversationService;
use crate::realtime::PushRegistry;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Conversation service orchestrating store, push, and upload
    pub conversations: ConversationService,

    /// Per-user push channel registry
    ///
    /// The subscription endpoint registers channels here; the conversation
    /// service delivers into them.
    pub push_registry: PushRegistry,

    /// Database connection pool
    ///
    /// This is `None` if the database is not configured (e.g., if the
    /// `DATABASE_URL` environment variable is not set). The auth middleware
    /// skips its user-exists check in that case.
    pub db_pool: Option<PgPool>,
}

/// Allow handlers to take `State<ConversationService>` directly
impl FromRef<AppState> for ConversationService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.conversations.clone()
    }
}

/// Allow handlers to take `State<PushRegistry>` directly
impl FromRef<AppState> for PushRegistry {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.push_registry.clone()
    }
}

/// Allow handlers to take `State<Option<PgPool>>` directly
impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}
