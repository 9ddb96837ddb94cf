//! Service layer for relationship management

pub mod relationship_service;

pub use relationship_service::{PendingRequests, RelationshipService};
