//! Repository for the symmetric friends adjacency.
//!
//! A friendship is always two rows, one per direction. The pairwise
//! writers take a transaction so callers can combine them with the
//! ledger transition they belong to.

use crate::types::{RelationError, RelationResult};
use sqlx::{Sqlite, SqlitePool, Transaction};

/// Repository for friendship database operations
#[derive(Clone)]
pub struct FriendshipRepository {
    pool: SqlitePool,
}

impl FriendshipRepository {
    /// Create a new friendship repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Whether two users are currently friends
    pub async fn are_friends(&self, a: i64, b: i64) -> RelationResult<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM friendships WHERE user_id = ? AND friend_id = ?",
        )
        .bind(a)
        .bind(b)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RelationError::DatabaseError(e.to_string()))?;

        Ok(count > 0)
    }

    /// Friend ids of a user, oldest friendship first
    pub async fn friends_of(&self, user_id: i64) -> RelationResult<Vec<i64>> {
        let rows: Vec<i64> = sqlx::query_scalar(
            "SELECT friend_id FROM friendships WHERE user_id = ? ORDER BY created_at, friend_id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RelationError::DatabaseError(e.to_string()))?;

        Ok(rows)
    }

    /// Insert both directions of a friendship inside the caller's transaction.
    ///
    /// `INSERT OR IGNORE` keeps the operation idempotent under retries.
    pub async fn link(
        tx: &mut Transaction<'_, Sqlite>,
        a: i64,
        b: i64,
    ) -> RelationResult<()> {
        let now = chrono::Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT OR IGNORE INTO friendships (user_id, friend_id, created_at) VALUES (?, ?, ?), (?, ?, ?)",
        )
        .bind(a)
        .bind(b)
        .bind(&now)
        .bind(b)
        .bind(a)
        .bind(&now)
        .execute(&mut **tx)
        .await
        .map_err(|e| RelationError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// Delete both directions of a friendship inside the caller's transaction.
    ///
    /// Deleting an absent friendship is not an error.
    pub async fn unlink(
        tx: &mut Transaction<'_, Sqlite>,
        a: i64,
        b: i64,
    ) -> RelationResult<u64> {
        let result = sqlx::query(
            "DELETE FROM friendships
             WHERE (user_id = ? AND friend_id = ?) OR (user_id = ? AND friend_id = ?)",
        )
        .bind(a)
        .bind(b)
        .bind(b)
        .bind(a)
        .execute(&mut **tx)
        .await
        .map_err(|e| RelationError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{create_test_pool, insert_test_user};

    #[tokio::test]
    async fn test_link_is_symmetric_and_idempotent() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = FriendshipRepository::new(pool.clone());

        let a = insert_test_user(&pool, "a@example.com", "Alice").await;
        let b = insert_test_user(&pool, "b@example.com", "Bob").await;

        let mut tx = pool.begin().await.unwrap();
        FriendshipRepository::link(&mut tx, a, b).await.unwrap();
        tx.commit().await.unwrap();

        assert!(repo.are_friends(a, b).await.unwrap());
        assert!(repo.are_friends(b, a).await.unwrap());

        // Linking again changes nothing.
        let mut tx = pool.begin().await.unwrap();
        FriendshipRepository::link(&mut tx, b, a).await.unwrap();
        tx.commit().await.unwrap();

        assert_eq!(repo.friends_of(a).await.unwrap(), vec![b]);
        assert_eq!(repo.friends_of(b).await.unwrap(), vec![a]);
    }

    #[tokio::test]
    async fn test_unlink_removes_both_directions() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = FriendshipRepository::new(pool.clone());

        let a = insert_test_user(&pool, "a@example.com", "Alice").await;
        let b = insert_test_user(&pool, "b@example.com", "Bob").await;

        let mut tx = pool.begin().await.unwrap();
        FriendshipRepository::link(&mut tx, a, b).await.unwrap();
        tx.commit().await.unwrap();

        let mut tx = pool.begin().await.unwrap();
        let removed = FriendshipRepository::unlink(&mut tx, b, a).await.unwrap();
        tx.commit().await.unwrap();

        assert_eq!(removed, 2);
        assert!(!repo.are_friends(a, b).await.unwrap());
        assert!(!repo.are_friends(b, a).await.unwrap());

        // Unlinking strangers is a no-op.
        let mut tx = pool.begin().await.unwrap();
        let removed = FriendshipRepository::unlink(&mut tx, a, b).await.unwrap();
        tx.commit().await.unwrap();
        assert_eq!(removed, 0);
    }
}
