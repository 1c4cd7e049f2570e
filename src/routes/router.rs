/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * Fixed-path routes are registered before the catch-all `/{id}` so that
 * `/connections`, `/unread-count`, and `/events` never match as a user ID.
 * All chat routes require authentication; the middleware runs before any
 * handler.
 */

use axum::{http::StatusCode, middleware, routing, Json, Router};
use tower_http::trace::TraceLayer;

use crate::messaging::handlers::{
    get_contacts, get_conversation, get_unread_count, mark_seen, send_message,
};
use crate::middleware::auth::auth_middleware;
use crate::realtime::subscription::handle_push_subscription;
use crate::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Routes
///
/// - `GET /connections` - Contact list for the authenticated user
/// - `GET /unread-count` - Unread message counter
/// - `GET /events` - Per-user push stream (SSE)
/// - `GET /{id}` - Conversation history with user `id`
/// - `POST /send/{id}` - Send a message to user `id`
/// - `PUT /seen/{id}` - Mark messages from user `id` as seen
///
/// All routes require a bearer token. Unknown routes get a JSON 404.
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new()
        .route("/connections", routing::get(get_contacts))
        .route("/unread-count", routing::get(get_unread_count))
        .route("/events", routing::get(handle_push_subscription))
        .route("/send/{id}", routing::post(send_message))
        .route("/seen/{id}", routing::put(mark_seen))
        .route("/{id}", routing::get(get_conversation))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    let router = router.fallback(|| async {
        (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "Not found", "status": 404 })),
        )
    });

    router.layer(TraceLayer::new_for_http()).with_state(app_state)
}
