//! wirechat - Main Library
//!
//! wirechat is a real-time messaging backend built with Rust: REST endpoints
//! for chat contacts, conversation history, sending messages (optionally with
//! an image attachment), and read tracking, with live delivery over a
//! per-user Server-Sent Events push channel.
//!
//! # Module Structure
//!
//! - **`model`** - Domain types (messages, contacts, connections, push events)
//! - **`error`** - Error taxonomy and HTTP response conversion
//! - **`auth`** - JWT token creation and verification
//! - **`middleware`** - Bearer-token authentication middleware and extractor
//! - **`messaging`** - Message store, contact resolution, conversation
//!   service, and the HTTP handlers on top
//! - **`realtime`** - Per-user push channel registry and SSE subscription
//! - **`upload`** - Image hosting collaborator client
//! - **`routes`** - Router assembly
//! - **`server`** - Configuration, shared state, app construction

pub mod auth;
pub mod error;
pub mod messaging;
pub mod middleware;
pub mod model;
pub mod realtime;
pub mod routes;
pub mod server;
pub mod upload;
