//! Utility modules
//!
//! - **auth**: password hashing
//! - **error**: error taxonomy and HTTP rendering
//! - **logging**: tracing subscriber setup

pub mod auth;
pub mod error;
pub mod logging;
