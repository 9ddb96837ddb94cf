//! Repository implementations for database access

pub mod conversation_repository;
pub mod friend_request_repository;
pub mod friendship_repository;
pub mod message_repository;
pub mod user_repository;

pub use conversation_repository::ConversationRepository;
pub use friend_request_repository::FriendRequestRepository;
pub use friendship_repository::FriendshipRepository;
pub use message_repository::MessageRepository;
pub use user_repository::UserRepository;
