use serde::{Deserialize, Serialize};

/// A single message within a conversation.
///
/// Sender and receiver are always the two participants of the referenced
/// conversation. A message is created unread and flips to read exactly once,
/// when the receiver views the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Database primary key
    pub id: i64,
    /// Publicly accessible identifier
    pub public_id: String,
    pub conversation_id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub content: String,
    pub read: bool,
    pub created_at: String,
}
