//! Common test utilities for bugby-rs
//!
//! - In-memory SQLite database support
//! - Test fixtures and data factories
//! - A fully wired application state for HTTP tests

pub mod database;
pub mod fixtures;

pub use database::TestDatabase;
pub use fixtures::{TEST_POLICY, TEST_SECRET, UserFactory, test_config};

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
