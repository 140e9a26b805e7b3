//! Cryptographic utilities
//!
//! Argon2 password hashing for stored credentials.

pub mod password;

pub use password::{hash_password, verify_password, verify_unknown_account};
