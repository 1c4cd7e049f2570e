/**
 * Push Subscription Handler
 *
 * This module implements the Server-Sent Events (SSE) subscription handler
 * for the `/events` endpoint. Each authenticated user gets a private stream
 * of push events: new messages addressed to them and seen notifications for
 * messages they sent.
 *
 * # Connection Management
 *
 * - Connecting registers a push channel for the user; a second connection
 *   replaces the first, which then ends
 * - Connections are kept alive using the SSE keep-alive mechanism
 * - When the stream is dropped the channel is unregistered, unless a newer
 *   registration has already replaced it
 */

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures_util::stream;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::realtime::registry::{ChannelTicket, PushRegistry};
use crate::server::state::AppState;

/// Unregisters the subscription's channel when the stream is dropped
struct SubscriptionGuard {
    registry: PushRegistry,
    user_id: Uuid,
    ticket: ChannelTicket,
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        tracing::debug!("Push subscription closed for user {}", self.user_id);
        self.registry.unregister(self.user_id, self.ticket);
    }
}

/// Handle push subscription (GET /events)
///
/// This endpoint provides a per-user real-time stream using Server-Sent
/// Events. Events are named (`newMessage`, `messagesSeen`) with JSON data.
///
/// # Returns
///
/// Server-Sent Events stream with this user's push events
pub async fn handle_push_subscription(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, axum::Error>>> {
    let registry = app_state.push_registry.clone();
    let (ticket, receiver) = registry.register(user.user_id);

    tracing::info!("Push subscription active for user {}", user.user_id);

    let guard = SubscriptionGuard {
        registry,
        user_id: user.user_id,
        ticket,
    };

    // The guard travels inside the unfold state so dropping the stream
    // (client disconnect) unregisters the channel.
    let stream = stream::unfold(
        (receiver, guard),
        |(mut rx, guard)| async move {
            loop {
                match rx.recv().await {
                    Some(event) => {
                        let data = match event.payload().and_then(|p| serde_json::to_string(&p)) {
                            Ok(data) => data,
                            Err(e) => {
                                tracing::error!("Failed to serialize push event: {:?}", e);
                                continue;
                            }
                        };

                        let sse_event = Event::default().event(event.name()).data(data);
                        return Some((Ok(sse_event), (rx, guard)));
                    }
                    // Sender dropped: this channel was replaced by a newer
                    // registration. End the stream.
                    None => {
                        tracing::debug!("Push channel replaced, ending stream");
                        return None;
                    }
                }
            }
        },
    );

    Sse::new(stream).keep_alive(KeepAlive::default())
}
