//! Authentication and authorization
//!
//! Access tokens ([`jwt`]), refresh tokens ([`refresh_token`]) and the rule-based
//! [`policy`] engine consulted by the authorization gate. The gates themselves live in
//! `server::middleware`.

pub mod jwt;
pub mod policy;
pub mod refresh_token;
mod types;


pub use types::{IdentityContext, RefreshContext, RoleLookup, get_identity};
#[cfg(test)]
pub use types::MockRoleLookup;
