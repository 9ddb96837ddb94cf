//! Relationship service: friend requests and the friends list.

use alumnet_database::{
    FriendRequest, FriendRequestRepository, FriendshipRepository, RelationError, RelationResult,
    RequestStatus, UserRepository,
};
use sqlx::SqlitePool;
use tracing::info;

/// A user's open requests, split by direction
#[derive(Debug, Clone)]
pub struct PendingRequests {
    pub sent: Vec<FriendRequest>,
    pub received: Vec<FriendRequest>,
}

/// Service enforcing the friend-request lifecycle and friends-list symmetry
#[derive(Clone)]
pub struct RelationshipService {
    pool: SqlitePool,
    users: UserRepository,
    requests: FriendRequestRepository,
    friendships: FriendshipRepository,
}

impl RelationshipService {
    /// Create a new relationship service instance
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            requests: FriendRequestRepository::new(pool.clone()),
            friendships: FriendshipRepository::new(pool.clone()),
            pool,
        }
    }

    /// Send a friend request from `sender_id` to `receiver_id`.
    ///
    /// The duplicate check treats the pair as unordered: while any request
    /// between the two is pending, neither side can open another one.
    pub async fn send_request(
        &self,
        sender_id: i64,
        receiver_id: i64,
    ) -> RelationResult<FriendRequest> {
        if sender_id == receiver_id {
            return Err(RelationError::InvalidTarget);
        }

        if !self.user_exists(sender_id).await? || !self.user_exists(receiver_id).await? {
            return Err(RelationError::UserNotFound);
        }

        if self.friendships.are_friends(sender_id, receiver_id).await? {
            return Err(RelationError::AlreadyFriends);
        }

        if self
            .requests
            .pending_between(sender_id, receiver_id)
            .await?
            .is_some()
        {
            return Err(RelationError::DuplicateRequest);
        }

        // The partial unique index catches a request racing past the check.
        self.requests.create(sender_id, receiver_id).await
    }

    /// Accept a pending request. Only the receiver may accept.
    ///
    /// The status flip and both friendship rows commit atomically; a lost
    /// race on the status leaves the store untouched and reports
    /// `AlreadyProcessed`.
    pub async fn accept_request(
        &self,
        request_public_id: &str,
        acting_user: i64,
    ) -> RelationResult<FriendRequest> {
        let request = self
            .requests
            .find_by_public_id(request_public_id)
            .await?
            .ok_or(RelationError::RequestNotFound)?;

        if request.receiver_id != acting_user {
            return Err(RelationError::Forbidden);
        }

        if !request.is_pending() {
            return Err(RelationError::AlreadyProcessed);
        }

        let now = chrono::Utc::now().to_rfc3339();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RelationError::DatabaseError(e.to_string()))?;

        let updated = sqlx::query(
            "UPDATE friend_requests SET status = 'accepted', updated_at = ? WHERE id = ? AND status = 'pending'",
        )
        .bind(&now)
        .bind(request.id)
        .execute(&mut *tx)
        .await
        .map_err(|e| RelationError::DatabaseError(e.to_string()))?;

        if updated.rows_affected() == 0 {
            return Err(RelationError::AlreadyProcessed);
        }

        FriendshipRepository::link(&mut tx, request.sender_id, request.receiver_id).await?;

        tx.commit()
            .await
            .map_err(|e| RelationError::DatabaseError(e.to_string()))?;

        info!(
            request = %request.public_id,
            sender_id = request.sender_id,
            receiver_id = request.receiver_id,
            "friend request accepted"
        );

        Ok(FriendRequest {
            status: RequestStatus::Accepted,
            updated_at: now,
            ..request
        })
    }

    /// Reject a pending request, or cancel one you sent.
    ///
    /// Either party may resolve the request this way; the friends list is
    /// unaffected and a new request may be sent afterwards.
    pub async fn reject_request(
        &self,
        request_public_id: &str,
        acting_user: i64,
    ) -> RelationResult<FriendRequest> {
        let request = self
            .requests
            .find_by_public_id(request_public_id)
            .await?
            .ok_or(RelationError::RequestNotFound)?;

        if !request.involves(acting_user) {
            return Err(RelationError::Forbidden);
        }

        if !request.is_pending() {
            return Err(RelationError::AlreadyProcessed);
        }

        let now = chrono::Utc::now().to_rfc3339();

        let updated = sqlx::query(
            "UPDATE friend_requests SET status = 'rejected', updated_at = ? WHERE id = ? AND status = 'pending'",
        )
        .bind(&now)
        .bind(request.id)
        .execute(&self.pool)
        .await
        .map_err(|e| RelationError::DatabaseError(e.to_string()))?;

        if updated.rows_affected() == 0 {
            return Err(RelationError::AlreadyProcessed);
        }

        info!(
            request = %request.public_id,
            acting_user = acting_user,
            "friend request rejected"
        );

        Ok(FriendRequest {
            status: RequestStatus::Rejected,
            updated_at: now,
            ..request
        })
    }

    /// Dissolve a friendship. Safe to repeat; the request ledger is not
    /// touched, so a new request between the pair is allowed immediately.
    pub async fn unfriend(&self, acting_user: i64, other_user: i64) -> RelationResult<()> {
        if !self.user_exists(other_user).await? {
            return Err(RelationError::UserNotFound);
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RelationError::DatabaseError(e.to_string()))?;

        let removed = FriendshipRepository::unlink(&mut tx, acting_user, other_user).await?;

        tx.commit()
            .await
            .map_err(|e| RelationError::DatabaseError(e.to_string()))?;

        if removed > 0 {
            info!(
                acting_user = acting_user,
                other_user = other_user,
                "friendship dissolved"
            );
        }

        Ok(())
    }

    /// A user's pending requests, most recent first in each direction
    pub async fn list_requests(&self, user_id: i64) -> RelationResult<PendingRequests> {
        let sent = self.requests.pending_sent(user_id).await?;
        let received = self.requests.pending_received(user_id).await?;

        Ok(PendingRequests { sent, received })
    }

    /// Friend ids of a user
    pub async fn list_friends(&self, user_id: i64) -> RelationResult<Vec<i64>> {
        self.friendships.friends_of(user_id).await
    }

    /// Whether two users are currently friends
    pub async fn are_friends(&self, a: i64, b: i64) -> RelationResult<bool> {
        self.friendships.are_friends(a, b).await
    }

    async fn user_exists(&self, user_id: i64) -> RelationResult<bool> {
        self.users
            .exists(user_id)
            .await
            .map_err(|e| RelationError::DatabaseError(e.to_string()))
    }
}
