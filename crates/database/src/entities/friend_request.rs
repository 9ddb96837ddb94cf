use serde::{Deserialize, Serialize};

/// A directed friend request between two members.
///
/// For any unordered pair of users, at most one request may be `pending`
/// at a time regardless of direction. A request transitions exactly once,
/// to `accepted` or `rejected`, and never reverts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendRequest {
    /// Database primary key
    pub id: i64,
    /// Publicly accessible identifier
    pub public_id: String,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub status: RequestStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// Friend request lifecycle state
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
}

impl From<&str> for RequestStatus {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "accepted" => RequestStatus::Accepted,
            "rejected" => RequestStatus::Rejected,
            _ => RequestStatus::Pending,
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestStatus::Pending => write!(f, "pending"),
            RequestStatus::Accepted => write!(f, "accepted"),
            RequestStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl FriendRequest {
    /// Whether the request is still awaiting a decision
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    /// Whether `user_id` is one of the two parties
    pub fn involves(&self, user_id: i64) -> bool {
        self.sender_id == user_id || self.receiver_id == user_id
    }
}
