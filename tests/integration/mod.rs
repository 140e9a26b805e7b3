//! Integration tests for bugby-rs
//!
//! These tests verify the interaction between multiple components against a real in-memory
//! database.

pub mod auth_flow_tests;
pub mod config_validation_tests;
pub mod database_tests;
pub mod token_store_tests;
