//! Repository for conversation data access operations.

use crate::entities::{normalize_pair, Conversation};
use crate::types::{MessagingError, MessagingResult};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::info;

const CONVERSATION_COLUMNS: &str =
    "id, public_id, user_a_id, user_b_id, last_message, last_message_time, created_at, updated_at";

fn map_conversation(row: &SqliteRow) -> MessagingResult<Conversation> {
    Ok(Conversation {
        id: row
            .try_get("id")
            .map_err(|e| MessagingError::DatabaseError(e.to_string()))?,
        public_id: row
            .try_get("public_id")
            .map_err(|e| MessagingError::DatabaseError(e.to_string()))?,
        user_a_id: row
            .try_get("user_a_id")
            .map_err(|e| MessagingError::DatabaseError(e.to_string()))?,
        user_b_id: row
            .try_get("user_b_id")
            .map_err(|e| MessagingError::DatabaseError(e.to_string()))?,
        last_message: row
            .try_get("last_message")
            .map_err(|e| MessagingError::DatabaseError(e.to_string()))?,
        last_message_time: row
            .try_get("last_message_time")
            .map_err(|e| MessagingError::DatabaseError(e.to_string()))?,
        created_at: row
            .try_get("created_at")
            .map_err(|e| MessagingError::DatabaseError(e.to_string()))?,
        updated_at: row
            .try_get("updated_at")
            .map_err(|e| MessagingError::DatabaseError(e.to_string()))?,
    })
}

/// Repository for conversation database operations
#[derive(Clone)]
pub struct ConversationRepository {
    pool: SqlitePool,
}

impl ConversationRepository {
    /// Create a new conversation repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a conversation by its public ID
    pub async fn find_by_public_id(&self, public_id: &str) -> MessagingResult<Option<Conversation>> {
        let row = sqlx::query(&format!(
            "SELECT {CONVERSATION_COLUMNS} FROM conversations WHERE public_id = ?"
        ))
        .bind(public_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| MessagingError::DatabaseError(e.to_string()))?;

        row.as_ref().map(map_conversation).transpose()
    }

    /// Find the conversation for an unordered participant pair
    pub async fn find_by_pair(&self, a: i64, b: i64) -> MessagingResult<Option<Conversation>> {
        let (user_a, user_b) = normalize_pair(a, b);

        let row = sqlx::query(&format!(
            "SELECT {CONVERSATION_COLUMNS} FROM conversations WHERE user_a_id = ? AND user_b_id = ?"
        ))
        .bind(user_a)
        .bind(user_b)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| MessagingError::DatabaseError(e.to_string()))?;

        row.as_ref().map(map_conversation).transpose()
    }

    /// Create a conversation for a participant pair.
    ///
    /// Returns the existing conversation if a concurrent caller created it
    /// first, so get-or-create stays idempotent.
    pub async fn create(&self, a: i64, b: i64) -> MessagingResult<Conversation> {
        let (user_a, user_b) = normalize_pair(a, b);
        let public_id = cuid2::create_id();
        let now = chrono::Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO conversations (public_id, user_a_id, user_b_id, last_message, last_message_time, created_at, updated_at)
             VALUES (?, ?, ?, '', ?, ?, ?)",
        )
        .bind(&public_id)
        .bind(user_a)
        .bind(user_b)
        .bind(&now)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => {
                info!(
                    conversation_id = done.last_insert_rowid(),
                    public_id = %public_id,
                    user_a_id = user_a,
                    user_b_id = user_b,
                    "created conversation"
                );

                Ok(Conversation {
                    id: done.last_insert_rowid(),
                    public_id,
                    user_a_id: user_a,
                    user_b_id: user_b,
                    last_message: String::new(),
                    last_message_time: now.clone(),
                    created_at: now.clone(),
                    updated_at: now,
                })
            }
            Err(e) if e.to_string().contains("UNIQUE constraint failed") => self
                .find_by_pair(user_a, user_b)
                .await?
                .ok_or_else(|| MessagingError::DatabaseError(e.to_string())),
            Err(e) => Err(MessagingError::DatabaseError(e.to_string())),
        }
    }

    /// Conversations a user participates in, most recently active first
    pub async fn list_for_user(&self, user_id: i64) -> MessagingResult<Vec<Conversation>> {
        let rows = sqlx::query(&format!(
            "SELECT {CONVERSATION_COLUMNS} FROM conversations
             WHERE user_a_id = ? OR user_b_id = ?
             ORDER BY last_message_time DESC, id DESC"
        ))
        .bind(user_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| MessagingError::DatabaseError(e.to_string()))?;

        rows.iter().map(map_conversation).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{create_test_pool, insert_test_user};

    #[tokio::test]
    async fn test_create_normalizes_pair() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = ConversationRepository::new(pool.clone());

        let a = insert_test_user(&pool, "a@example.com", "Alice").await;
        let b = insert_test_user(&pool, "b@example.com", "Bob").await;

        let conversation = repo.create(b, a).await.unwrap();
        assert!(conversation.user_a_id < conversation.user_b_id);
        assert_eq!(conversation.last_message, "");

        // Either orientation resolves to the same row.
        let found = repo.find_by_pair(a, b).await.unwrap().unwrap();
        assert_eq!(found.id, conversation.id);
        let found = repo.find_by_pair(b, a).await.unwrap().unwrap();
        assert_eq!(found.id, conversation.id);
    }

    #[tokio::test]
    async fn test_create_is_get_or_create() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = ConversationRepository::new(pool.clone());

        let a = insert_test_user(&pool, "a@example.com", "Alice").await;
        let b = insert_test_user(&pool, "b@example.com", "Bob").await;

        let first = repo.create(a, b).await.unwrap();
        let second = repo.create(b, a).await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(first.public_id, second.public_id);
    }

    #[tokio::test]
    async fn test_list_for_user() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = ConversationRepository::new(pool.clone());

        let a = insert_test_user(&pool, "a@example.com", "Alice").await;
        let b = insert_test_user(&pool, "b@example.com", "Bob").await;
        let c = insert_test_user(&pool, "c@example.com", "Carol").await;

        repo.create(a, b).await.unwrap();
        repo.create(a, c).await.unwrap();
        repo.create(b, c).await.unwrap();

        assert_eq!(repo.list_for_user(a).await.unwrap().len(), 2);
        assert_eq!(repo.list_for_user(b).await.unwrap().len(), 2);

        let d = insert_test_user(&pool, "d@example.com", "Dan").await;
        assert!(repo.list_for_user(d).await.unwrap().is_empty());
    }
}
