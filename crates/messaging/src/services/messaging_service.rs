//! Messaging service: conversations and messages.

use alumnet_database::{
    message_preview, Conversation, ConversationRepository, FriendshipRepository, Message,
    MessageRepository, MessagingError, MessagingResult, UserRepository,
};
use sqlx::SqlitePool;
use tracing::info;

/// A conversation as seen in a user's listing, annotated with the
/// counterpart and the caller's unread count.
#[derive(Debug, Clone)]
pub struct ConversationSummary {
    pub conversation: Conversation,
    pub other_user_id: i64,
    pub unread_count: i64,
}

/// Service gating conversations on friendship and messages on participation
#[derive(Clone)]
pub struct MessagingService {
    pool: SqlitePool,
    users: UserRepository,
    friendships: FriendshipRepository,
    conversations: ConversationRepository,
    messages: MessageRepository,
}

impl MessagingService {
    /// Create a new messaging service instance
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            friendships: FriendshipRepository::new(pool.clone()),
            conversations: ConversationRepository::new(pool.clone()),
            messages: MessageRepository::new(pool.clone()),
            pool,
        }
    }

    /// Get or create the conversation between the requester and a friend.
    ///
    /// Friendship is checked before the lookup: an existing conversation is
    /// only handed back while the two are still friends.
    pub async fn open_conversation(
        &self,
        requester: i64,
        other_user: i64,
    ) -> MessagingResult<Conversation> {
        if requester == other_user {
            return Err(MessagingError::InvalidTarget);
        }

        if !self.user_exists(requester).await? || !self.user_exists(other_user).await? {
            return Err(MessagingError::UserNotFound);
        }

        let friends = self
            .friendships
            .are_friends(requester, other_user)
            .await
            .map_err(|e| MessagingError::DatabaseError(e.to_string()))?;
        if !friends {
            return Err(MessagingError::NotFriends);
        }

        if let Some(existing) = self.conversations.find_by_pair(requester, other_user).await? {
            return Ok(existing);
        }

        self.conversations.create(requester, other_user).await
    }

    /// Append a message to a conversation.
    ///
    /// The message row and the conversation preview move together in one
    /// transaction.
    pub async fn send_message(
        &self,
        conversation_public_id: &str,
        sender: i64,
        receiver: i64,
        content: &str,
    ) -> MessagingResult<Message> {
        let conversation = self
            .conversations
            .find_by_public_id(conversation_public_id)
            .await?
            .ok_or(MessagingError::ConversationNotFound)?;

        if !conversation.has_participant(sender) {
            return Err(MessagingError::Forbidden);
        }

        let content = content.trim();
        if content.is_empty() {
            return Err(MessagingError::EmptyMessage);
        }

        // The receiver must be the other half of the pair.
        if receiver != conversation.other_participant(sender) {
            return Err(MessagingError::InvalidTarget);
        }

        let public_id = cuid2::create_id();
        let now = chrono::Utc::now().to_rfc3339();
        let preview = message_preview(content);

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| MessagingError::DatabaseError(e.to_string()))?;

        let result = sqlx::query(
            "INSERT INTO messages (public_id, conversation_id, sender_id, receiver_id, content, read, created_at)
             VALUES (?, ?, ?, ?, ?, 0, ?)",
        )
        .bind(&public_id)
        .bind(conversation.id)
        .bind(sender)
        .bind(receiver)
        .bind(content)
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(|e| MessagingError::DatabaseError(e.to_string()))?;

        sqlx::query(
            "UPDATE conversations SET last_message = ?, last_message_time = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&preview)
        .bind(&now)
        .bind(&now)
        .bind(conversation.id)
        .execute(&mut *tx)
        .await
        .map_err(|e| MessagingError::DatabaseError(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| MessagingError::DatabaseError(e.to_string()))?;

        info!(
            conversation = %conversation.public_id,
            message = %public_id,
            sender_id = sender,
            "message sent"
        );

        Ok(Message {
            id: result.last_insert_rowid(),
            public_id,
            conversation_id: conversation.id,
            sender_id: sender,
            receiver_id: receiver,
            content: content.to_string(),
            read: false,
            created_at: now,
        })
    }

    /// Read a conversation's messages in creation order.
    ///
    /// Viewing marks the requester's unread inbound messages as read; the
    /// requester's own messages are untouched. Safe to repeat.
    pub async fn fetch_messages(
        &self,
        conversation_public_id: &str,
        requester: i64,
    ) -> MessagingResult<(Conversation, Vec<Message>)> {
        let conversation = self
            .conversations
            .find_by_public_id(conversation_public_id)
            .await?
            .ok_or(MessagingError::ConversationNotFound)?;

        if !conversation.has_participant(requester) {
            return Err(MessagingError::Forbidden);
        }

        self.messages.mark_read(conversation.id, requester).await?;

        let messages = self.messages.list_for_conversation(conversation.id).await?;

        Ok((conversation, messages))
    }

    /// The requester's conversations, most recently active first, each
    /// annotated with the other participant for profile projection.
    pub async fn list_conversations(
        &self,
        requester: i64,
    ) -> MessagingResult<Vec<ConversationSummary>> {
        let conversations = self.conversations.list_for_user(requester).await?;

        let mut summaries = Vec::with_capacity(conversations.len());
        for conversation in conversations {
            let other_user_id = conversation.other_participant(requester);
            let unread_count = self
                .messages
                .count_unread(conversation.id, requester)
                .await?;

            summaries.push(ConversationSummary {
                conversation,
                other_user_id,
                unread_count,
            });
        }

        Ok(summaries)
    }

    /// Unread message count for a participant of a conversation
    pub async fn unread_count(&self, conversation_id: i64, requester: i64) -> MessagingResult<i64> {
        self.messages.count_unread(conversation_id, requester).await
    }

    async fn user_exists(&self, user_id: i64) -> MessagingResult<bool> {
        self.users
            .exists(user_id)
            .await
            .map_err(|e| MessagingError::DatabaseError(e.to_string()))
    }
}
