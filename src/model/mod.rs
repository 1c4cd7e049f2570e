//! Domain Types
//!
//! Data structures shared between the store, the conversation service, and
//! the HTTP surface: messages, contacts, connections, and push events.

pub mod connection;
pub mod contact;
pub mod event;
pub mod message;

pub use connection::{Connection, ConnectionStatus};
pub use contact::Contact;
pub use event::PushEvent;
pub use message::{Message, MessageStatus, SendMessagePayload};
