//! Service layer for the user directory

pub mod user_service;

pub use user_service::UserService;
