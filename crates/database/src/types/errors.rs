//! Error types for the database layer

use thiserror::Error;

/// General database error
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    #[error("Database query error: {0}")]
    QueryError(String),

    #[error("Database migration error: {0}")]
    MigrationError(String),
}

/// User directory errors
#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found")]
    UserNotFound,

    #[error("Email already exists")]
    EmailAlreadyExists,

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Friend-request and friendship errors
#[derive(Debug, Error)]
pub enum RelationError {
    #[error("Cannot send a friend request to yourself")]
    InvalidTarget,

    #[error("User not found")]
    UserNotFound,

    #[error("Already friends")]
    AlreadyFriends,

    #[error("A pending request already exists for this pair")]
    DuplicateRequest,

    #[error("Friend request not found")]
    RequestNotFound,

    #[error("Not authorized to act on this request")]
    Forbidden,

    #[error("Request already processed")]
    AlreadyProcessed,

    #[error("Concurrent update lost, retry")]
    Conflict,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Conversation and message errors
#[derive(Debug, Error)]
pub enum MessagingError {
    #[error("Cannot open a conversation with yourself")]
    InvalidTarget,

    #[error("User not found")]
    UserNotFound,

    #[error("Conversation not found")]
    ConversationNotFound,

    #[error("Users are not friends")]
    NotFriends,

    #[error("Not a participant of this conversation")]
    Forbidden,

    #[error("Message content cannot be empty")]
    EmptyMessage,

    #[error("Database error: {0}")]
    DatabaseError(String),
}
