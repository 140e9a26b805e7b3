//! Test fixtures and data factories

use super::database::test_db_config;
use bugby_rs::config::{Config, RateLimitConfig, StorageConfig};
use bugby_rs::core::models::User;
use uuid::Uuid;

pub const TEST_SECRET: &str = "Integration-Test-Secret-0123456789abcdef";

pub const TEST_POLICY: &str = "\
p, user, /api/users, put
p, user, /api/bugs, post
p, user, /api/bugs/:bugid, post
p, user, /api/bugs/:bugid, delete
p, admin, /api/*, *
";

/// Valid configuration backed by an in-memory database, rate limiting off
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.auth.jwt_secret = TEST_SECRET.to_string();
    config.storage = StorageConfig {
        database: test_db_config(),
    };
    config.rate_limit = RateLimitConfig {
        enabled: false,
        ..Default::default()
    };
    config
}

/// Factory for creating test users
pub struct UserFactory;

impl UserFactory {
    /// Unique email, placeholder hash, role `user`
    pub fn create() -> User {
        User::new(
            format!("test-{}@example.com", &Uuid::new_v4().to_string()[..8]),
            "hashed_password".to_string(),
            "user",
        )
    }

    /// Create an admin user
    pub fn admin() -> User {
        let mut user = Self::create();
        user.role = "admin".to_string();
        user
    }

    /// Create a user with specific email
    pub fn with_email(email: &str) -> User {
        let mut user = Self::create();
        user.email = email.to_string();
        user
    }
}
