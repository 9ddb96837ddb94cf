//! Domain entities backed by the database

pub mod conversation;
pub mod friend_request;
pub mod message;
pub mod user;

pub use conversation::{message_preview, normalize_pair, Conversation, MESSAGE_PREVIEW_LEN};
pub use friend_request::{FriendRequest, RequestStatus};
pub use message::Message;
pub use user::{UpdateProfileRequest, User, UserRole};
