/**
 * Push Channel Registry
 *
 * This module manages per-user push channels for real-time delivery. A user
 * has at most one active channel at a time; registering again replaces the
 * previous channel, which ends the older subscription stream.
 *
 * # Tickets
 *
 * `register` hands back a `ChannelTicket` alongside the receiver. The ticket
 * must be presented to `unregister` and only removes the entry if it still
 * matches, so a disconnect racing a reconnect cannot tear down the successor
 * channel.
 */

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::model::PushEvent;

/// Identifies one registration of a user's push channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelTicket(u64);

struct ChannelEntry {
    ticket: ChannelTicket,
    sender: mpsc::UnboundedSender<PushEvent>,
}

/// Registry of active push channels, keyed by user ID
#[derive(Clone)]
pub struct PushRegistry {
    channels: Arc<Mutex<HashMap<Uuid, ChannelEntry>>>,
    next_ticket: Arc<AtomicU64>,
}

impl PushRegistry {
    pub fn new() -> Self {
        Self {
            channels: Arc::new(Mutex::new(HashMap::new())),
            next_ticket: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Register a push channel for a user, replacing any existing one
    ///
    /// Returns the ticket for this registration and the receiving end of the
    /// channel. Dropping a replaced sender closes the old receiver, ending
    /// the stream it feeds.
    pub fn register(&self, user_id: Uuid) -> (ChannelTicket, mpsc::UnboundedReceiver<PushEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let ticket = ChannelTicket(self.next_ticket.fetch_add(1, Ordering::Relaxed));

        let mut channels = self.channels.lock().unwrap();
        if channels.insert(user_id, ChannelEntry { ticket, sender }).is_some() {
            tracing::debug!("Replaced existing push channel for user {}", user_id);
        }

        (ticket, receiver)
    }

    /// Remove a user's push channel if the ticket still matches
    ///
    /// A stale ticket (the user has since reconnected) is a no-op.
    pub fn unregister(&self, user_id: Uuid, ticket: ChannelTicket) {
        let mut channels = self.channels.lock().unwrap();
        if channels.get(&user_id).map(|entry| entry.ticket) == Some(ticket) {
            channels.remove(&user_id);
        }
    }

    /// Deliver an event to a user's push channel
    ///
    /// Returns `true` if the user had an active channel and the event was
    /// queued. Delivery to a disconnected user is a silent no-op.
    pub fn deliver(&self, user_id: Uuid, event: PushEvent) -> bool {
        let channels = self.channels.lock().unwrap();
        match channels.get(&user_id) {
            Some(entry) => entry.sender.send(event).is_ok(),
            None => false,
        }
    }

    /// Whether a user currently has an active push channel
    pub fn is_connected(&self, user_id: Uuid) -> bool {
        self.channels.lock().unwrap().contains_key(&user_id)
    }
}

impl Default for PushRegistry {
    fn default() -> Self {
        Self::new()
    }
}
