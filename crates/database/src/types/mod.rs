//! Shared types for the database layer

pub mod errors;

pub use errors::{DatabaseError, MessagingError, RelationError, UserError};

/// Result type alias for general database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Result type alias for user directory operations
pub type UserResult<T> = Result<T, UserError>;

/// Result type alias for relationship operations
pub type RelationResult<T> = Result<T, RelationError>;

/// Result type alias for messaging operations
pub type MessagingResult<T> = Result<T, MessagingError>;
