//! Contact Data Structure
//!
//! The safe projection of a user shown in another user's contact list.
//! Only the fields a counterpart is allowed to see are carried here.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A chat contact as seen by another user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    /// User ID of the contact
    pub id: Uuid,
    /// Display name
    #[serde(rename = "fullName")]
    pub full_name: String,
    /// Avatar URL
    #[serde(rename = "photoURL")]
    pub photo_url: String,
}
