// Module declarations
mod bug_ops;
mod connection;
mod token_ops;
mod types;
mod user_ops;

// Re-export public types
pub use types::{DatabaseBackendType, SeaOrmDatabase};
