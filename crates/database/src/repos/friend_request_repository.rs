//! Repository for the friend request ledger.

use crate::entities::{FriendRequest, RequestStatus};
use crate::types::{RelationError, RelationResult};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::info;

const REQUEST_COLUMNS: &str =
    "id, public_id, sender_id, receiver_id, status, created_at, updated_at";

fn map_request(row: &SqliteRow) -> RelationResult<FriendRequest> {
    let status: String = row
        .try_get("status")
        .map_err(|e| RelationError::DatabaseError(e.to_string()))?;

    Ok(FriendRequest {
        id: row
            .try_get("id")
            .map_err(|e| RelationError::DatabaseError(e.to_string()))?,
        public_id: row
            .try_get("public_id")
            .map_err(|e| RelationError::DatabaseError(e.to_string()))?,
        sender_id: row
            .try_get("sender_id")
            .map_err(|e| RelationError::DatabaseError(e.to_string()))?,
        receiver_id: row
            .try_get("receiver_id")
            .map_err(|e| RelationError::DatabaseError(e.to_string()))?,
        status: RequestStatus::from(status.as_str()),
        created_at: row
            .try_get("created_at")
            .map_err(|e| RelationError::DatabaseError(e.to_string()))?,
        updated_at: row
            .try_get("updated_at")
            .map_err(|e| RelationError::DatabaseError(e.to_string()))?,
    })
}

/// Repository for friend request database operations
#[derive(Clone)]
pub struct FriendRequestRepository {
    pool: SqlitePool,
}

impl FriendRequestRepository {
    /// Create a new friend request repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a request by its public ID
    pub async fn find_by_public_id(&self, public_id: &str) -> RelationResult<Option<FriendRequest>> {
        let row = sqlx::query(&format!(
            "SELECT {REQUEST_COLUMNS} FROM friend_requests WHERE public_id = ?"
        ))
        .bind(public_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RelationError::DatabaseError(e.to_string()))?;

        row.as_ref().map(map_request).transpose()
    }

    /// Find the pending request between two users, in either direction
    pub async fn pending_between(&self, a: i64, b: i64) -> RelationResult<Option<FriendRequest>> {
        let row = sqlx::query(&format!(
            "SELECT {REQUEST_COLUMNS} FROM friend_requests
             WHERE status = 'pending'
               AND ((sender_id = ? AND receiver_id = ?) OR (sender_id = ? AND receiver_id = ?))"
        ))
        .bind(a)
        .bind(b)
        .bind(b)
        .bind(a)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RelationError::DatabaseError(e.to_string()))?;

        row.as_ref().map(map_request).transpose()
    }

    /// Create a new pending request.
    ///
    /// The partial unique index on the normalized pair turns a lost race
    /// into `DuplicateRequest` instead of a second pending row.
    pub async fn create(&self, sender_id: i64, receiver_id: i64) -> RelationResult<FriendRequest> {
        let public_id = cuid2::create_id();
        let now = chrono::Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO friend_requests (public_id, sender_id, receiver_id, status, created_at, updated_at)
             VALUES (?, ?, ?, 'pending', ?, ?)",
        )
        .bind(&public_id)
        .bind(sender_id)
        .bind(receiver_id)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.to_string().contains("UNIQUE constraint failed") {
                RelationError::DuplicateRequest
            } else {
                RelationError::DatabaseError(e.to_string())
            }
        })?;

        let request_id = result.last_insert_rowid();

        info!(
            request_id = request_id,
            public_id = %public_id,
            sender_id = sender_id,
            receiver_id = receiver_id,
            "created friend request"
        );

        Ok(FriendRequest {
            id: request_id,
            public_id,
            sender_id,
            receiver_id,
            status: RequestStatus::Pending,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Pending requests sent by a user, most recent first
    pub async fn pending_sent(&self, user_id: i64) -> RelationResult<Vec<FriendRequest>> {
        let rows = sqlx::query(&format!(
            "SELECT {REQUEST_COLUMNS} FROM friend_requests
             WHERE sender_id = ? AND status = 'pending'
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RelationError::DatabaseError(e.to_string()))?;

        rows.iter().map(map_request).collect()
    }

    /// Pending requests received by a user, most recent first
    pub async fn pending_received(&self, user_id: i64) -> RelationResult<Vec<FriendRequest>> {
        let rows = sqlx::query(&format!(
            "SELECT {REQUEST_COLUMNS} FROM friend_requests
             WHERE receiver_id = ? AND status = 'pending'
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RelationError::DatabaseError(e.to_string()))?;

        rows.iter().map(map_request).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{create_test_pool, insert_test_user};

    #[tokio::test]
    async fn test_create_and_find() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = FriendRequestRepository::new(pool.clone());

        let a = insert_test_user(&pool, "a@example.com", "Alice").await;
        let b = insert_test_user(&pool, "b@example.com", "Bob").await;

        let request = repo.create(a, b).await.unwrap();
        assert!(request.id > 0);
        assert_eq!(request.status, RequestStatus::Pending);

        let found = repo.find_by_public_id(&request.public_id).await.unwrap();
        assert_eq!(found.unwrap().id, request.id);

        let pending = repo.pending_between(b, a).await.unwrap();
        assert_eq!(pending.unwrap().id, request.id);
    }

    #[tokio::test]
    async fn test_duplicate_pending_rejected_by_index() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = FriendRequestRepository::new(pool.clone());

        let a = insert_test_user(&pool, "a@example.com", "Alice").await;
        let b = insert_test_user(&pool, "b@example.com", "Bob").await;

        repo.create(a, b).await.unwrap();

        // Same direction.
        let same = repo.create(a, b).await;
        assert!(matches!(same, Err(RelationError::DuplicateRequest)));

        // Opposite direction hits the same normalized-pair index.
        let reversed = repo.create(b, a).await;
        assert!(matches!(reversed, Err(RelationError::DuplicateRequest)));
    }

    #[tokio::test]
    async fn test_pending_listings_ordered() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = FriendRequestRepository::new(pool.clone());

        let a = insert_test_user(&pool, "a@example.com", "Alice").await;
        let b = insert_test_user(&pool, "b@example.com", "Bob").await;
        let c = insert_test_user(&pool, "c@example.com", "Carol").await;

        let first = repo.create(a, b).await.unwrap();
        let second = repo.create(a, c).await.unwrap();

        let sent = repo.pending_sent(a).await.unwrap();
        assert_eq!(sent.len(), 2);
        // Most recent first.
        assert_eq!(sent[0].id, second.id);
        assert_eq!(sent[1].id, first.id);

        let received = repo.pending_received(b).await.unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].id, first.id);

        assert!(repo.pending_received(a).await.unwrap().is_empty());
    }
}
