/// Bug entity module
pub mod bug;
/// Refresh token entity module
pub mod refresh_token;
/// User entity module
pub mod user;

pub use bug::Entity as Bug;
pub use refresh_token::Entity as RefreshToken;
pub use user::Entity as User;
