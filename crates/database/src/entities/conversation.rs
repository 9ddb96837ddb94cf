use serde::{Deserialize, Serialize};

/// Maximum length of the `last_message` preview stored on a conversation.
pub const MESSAGE_PREVIEW_LEN: usize = 100;

/// A private channel between exactly two members.
///
/// The participant pair is stored normalized (`user_a_id < user_b_id`) so
/// that the unordered pair is unique at the store level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    /// Database primary key
    pub id: i64,
    /// Publicly accessible identifier
    pub public_id: String,
    pub user_a_id: i64,
    pub user_b_id: i64,
    /// Preview of the most recent message, truncated
    pub last_message: String,
    pub last_message_time: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Conversation {
    /// Whether `user_id` is one of the two participants
    pub fn has_participant(&self, user_id: i64) -> bool {
        self.user_a_id == user_id || self.user_b_id == user_id
    }

    /// The participant that is not `user_id`.
    ///
    /// Callers must check `has_participant` first; for a non-participant
    /// this returns `user_a_id`.
    pub fn other_participant(&self, user_id: i64) -> i64 {
        if self.user_a_id == user_id {
            self.user_b_id
        } else {
            self.user_a_id
        }
    }
}

/// Normalize an unordered user pair into storage order.
pub fn normalize_pair(a: i64, b: i64) -> (i64, i64) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Truncate message content down to a stored preview, on a char boundary.
pub fn message_preview(content: &str) -> String {
    content.chars().take(MESSAGE_PREVIEW_LEN).collect()
}
