//! Core data models
//!
//! Storage-independent shapes of the persisted records.

pub mod bug;
pub mod user;

pub use bug::{Bug, BugPatch};
pub use user::{User, UserProfile};
