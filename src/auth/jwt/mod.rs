//! Access token handling
//!
//! Short-lived, stateless HS256 tokens carrying only the subject identity and expiry.
//! Roles are deliberately not embedded; they are fetched fresh on every request.

mod handler;
mod types;


pub use types::{Claims, JwtHandler, TokenError, ISSUER};
