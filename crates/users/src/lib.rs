//! # Alumnet Users Crate
//!
//! The member directory: profile lookup, profile updates, and name search.
//! Relationship state lives elsewhere; this crate only deals in profiles.

pub mod services;

pub use services::UserService;
