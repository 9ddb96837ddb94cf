//! Repository for message data access operations.

use crate::entities::Message;
use crate::types::{MessagingError, MessagingResult};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

const MESSAGE_COLUMNS: &str =
    "id, public_id, conversation_id, sender_id, receiver_id, content, read, created_at";

fn map_message(row: &SqliteRow) -> MessagingResult<Message> {
    Ok(Message {
        id: row
            .try_get("id")
            .map_err(|e| MessagingError::DatabaseError(e.to_string()))?,
        public_id: row
            .try_get("public_id")
            .map_err(|e| MessagingError::DatabaseError(e.to_string()))?,
        conversation_id: row
            .try_get("conversation_id")
            .map_err(|e| MessagingError::DatabaseError(e.to_string()))?,
        sender_id: row
            .try_get("sender_id")
            .map_err(|e| MessagingError::DatabaseError(e.to_string()))?,
        receiver_id: row
            .try_get("receiver_id")
            .map_err(|e| MessagingError::DatabaseError(e.to_string()))?,
        content: row
            .try_get("content")
            .map_err(|e| MessagingError::DatabaseError(e.to_string()))?,
        read: row
            .try_get("read")
            .map_err(|e| MessagingError::DatabaseError(e.to_string()))?,
        created_at: row
            .try_get("created_at")
            .map_err(|e| MessagingError::DatabaseError(e.to_string()))?,
    })
}

/// Repository for message database operations
#[derive(Clone)]
pub struct MessageRepository {
    pool: SqlitePool,
}

impl MessageRepository {
    /// Create a new message repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All messages of a conversation in creation order
    pub async fn list_for_conversation(&self, conversation_id: i64) -> MessagingResult<Vec<Message>> {
        let rows = sqlx::query(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages
             WHERE conversation_id = ?
             ORDER BY created_at ASC, id ASC"
        ))
        .bind(conversation_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| MessagingError::DatabaseError(e.to_string()))?;

        rows.iter().map(map_message).collect()
    }

    /// Mark every unread message addressed to `receiver_id` as read.
    ///
    /// Conditional on `read = 0`, so repeated calls change nothing.
    pub async fn mark_read(&self, conversation_id: i64, receiver_id: i64) -> MessagingResult<u64> {
        let result = sqlx::query(
            "UPDATE messages SET read = 1
             WHERE conversation_id = ? AND receiver_id = ? AND read = 0",
        )
        .bind(conversation_id)
        .bind(receiver_id)
        .execute(&self.pool)
        .await
        .map_err(|e| MessagingError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }

    /// Unread message count for a participant, for listing badges
    pub async fn count_unread(&self, conversation_id: i64, receiver_id: i64) -> MessagingResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM messages
             WHERE conversation_id = ? AND receiver_id = ? AND read = 0",
        )
        .bind(conversation_id)
        .bind(receiver_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| MessagingError::DatabaseError(e.to_string()))?;

        Ok(count)
    }
}
