//! Connection Data Structure
//!
//! Represents directed connection requests between users. Two users are chat
//! contacts when a connection between them, in either direction, has been
//! accepted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status of a connection request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    /// Request is pending
    Pending,
    /// Request was accepted
    Accepted,
    /// Request was rejected
    Rejected,
}

impl Default for ConnectionStatus {
    fn default() -> Self {
        ConnectionStatus::Pending
    }
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Pending => "pending",
            ConnectionStatus::Accepted => "accepted",
            ConnectionStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(ConnectionStatus::Pending),
            "accepted" => Some(ConnectionStatus::Accepted),
            "rejected" => Some(ConnectionStatus::Rejected),
            _ => None,
        }
    }
}

/// A directed connection between two users
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Connection {
    /// Unique connection ID
    pub id: Uuid,
    /// User who initiated the connection
    pub from_user_id: Uuid,
    /// User who received the connection
    pub to_user_id: Uuid,
    /// Current status
    #[serde(default)]
    pub status: ConnectionStatus,
    /// When the connection was created
    pub created_at: DateTime<Utc>,
}

impl Connection {
    /// The other side of the connection from `user_id`'s point of view
    ///
    /// Returns `None` if `user_id` is on neither side.
    pub fn counterpart_of(&self, user_id: Uuid) -> Option<Uuid> {
        if self.from_user_id == user_id {
            Some(self.to_user_id)
        } else if self.to_user_id == user_id {
            Some(self.from_user_id)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connection(from: Uuid, to: Uuid) -> Connection {
        Connection {
            id: Uuid::new_v4(),
            from_user_id: from,
            to_user_id: to,
            status: ConnectionStatus::Accepted,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_status_round_trip() {
        assert_eq!(
            ConnectionStatus::from_str(ConnectionStatus::Accepted.as_str()),
            Some(ConnectionStatus::Accepted)
        );
        assert_eq!(ConnectionStatus::from_str("blocked"), None);
    }

    #[test]
    fn test_counterpart_of_either_side() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let conn = connection(a, b);

        assert_eq!(conn.counterpart_of(a), Some(b));
        assert_eq!(conn.counterpart_of(b), Some(a));
        assert_eq!(conn.counterpart_of(Uuid::new_v4()), None);
    }
}
