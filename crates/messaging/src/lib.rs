//! # Alumnet Messaging Crate
//!
//! Direct messaging between friends. Opening a conversation is gated on a
//! current friendship; reading and writing inside one is gated on being a
//! participant. Conversations are one-per-pair and never deleted.

pub mod services;

pub use services::{ConversationSummary, MessagingService};
