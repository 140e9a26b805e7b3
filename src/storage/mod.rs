//! Storage layer
//!
//! Relational persistence for users, refresh tokens and bugs.

/// Database storage module
pub mod database;

pub use database::{Database, DatabaseBackendType, SeaOrmDatabase};
