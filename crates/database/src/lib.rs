//! Alumnet Database Crate
//!
//! Connection management, migrations, domain entities, and repository
//! implementations for the Alumnet backend.

use sqlx::SqlitePool;

use alumnet_config::DatabaseConfig;

pub mod connection;
pub mod entities;
pub mod migrations;
pub mod repos;
pub mod types;

pub use connection::prepare_database;
pub use migrations::run_migrations;

// Re-export repositories
pub use repos::{
    ConversationRepository, FriendRequestRepository, FriendshipRepository, MessageRepository,
    UserRepository,
};

// Re-export entities
pub use entities::{
    conversation::{message_preview, normalize_pair, Conversation, MESSAGE_PREVIEW_LEN},
    friend_request::{FriendRequest, RequestStatus},
    message::Message,
    user::{UpdateProfileRequest, User, UserRole},
};

// Re-export types
pub use types::{
    errors::{DatabaseError, MessagingError, RelationError, UserError},
    DatabaseResult, MessagingResult, RelationResult, UserResult,
};

/// Initialize the database with migrations
pub async fn initialize_database(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    let pool = prepare_database(config)
        .await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    run_migrations(&pool)
        .await
        .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;

    Ok(pool)
}
