//! Error handling for the service
//!
//! This module defines the error taxonomy shared by the gates, handlers and storage layer,
//! together with its HTTP rendering.

#![allow(missing_docs)]

mod conversions;
mod helpers;
mod response;
#[cfg(test)]
mod tests;
mod types;

pub use response::ErrorResponse;
pub use types::{ApiError, Result};
