//! # Alumnet Relations Crate
//!
//! The friend-request state machine and the symmetric friends list.
//!
//! Per unordered user pair the reachable states are strangers, one pending
//! request (in one direction), and friends. Every transition that touches
//! more than one row runs in a single transaction, and the pending-request
//! uniqueness is backed by a store-level constraint, so the invariants hold
//! under concurrent requests:
//!
//! - at most one pending request per pair, in either direction
//! - `B` is a friend of `A` exactly when `A` is a friend of `B`
//! - a request transitions at most once, to accepted or rejected

pub mod services;

pub use services::{PendingRequests, RelationshipService};
