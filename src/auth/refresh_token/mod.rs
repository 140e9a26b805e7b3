//! Refresh token handling
//!
//! Long-lived, opaque, store-backed credentials used solely to mint new access tokens.
//! The core generates the values; persistence is delegated to a [`RefreshTokenStore`].

mod store;
mod types;

#[cfg(test)]
pub(crate) mod memory;

pub use store::{RefreshTokenStore, issue_refresh_token};
#[cfg(test)]
pub use store::MockRefreshTokenStore;
pub use types::{REFRESH_TOKEN_BYTES, RefreshToken, RefreshTokenState, generate_refresh_token};
