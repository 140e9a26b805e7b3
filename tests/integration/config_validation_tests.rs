//! Configuration validation integration tests

#[cfg(test)]
mod tests {
    use crate::common::{TEST_SECRET, test_config};
    use bugby_rs::config::Config;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_valid_config() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn test_short_secret_rejected() {
        let mut config = test_config();
        config.auth.jwt_secret = "Short-Secret".to_string();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("32 characters"));
    }

    #[test]
    fn test_refresh_ttl_must_exceed_access_ttl() {
        let mut config = test_config();
        config.auth.refresh_token_ttl = config.auth.access_token_ttl;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_rate_limit_rejected() {
        let mut config = test_config();
        config.rate_limit.burst = 0;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Rate limit"));
    }

    #[test]
    fn test_yaml_sections_default_when_omitted() {
        let yaml = format!("auth:\n  jwt_secret: \"{}\"\n", TEST_SECRET);
        let config = Config::from_yaml(&yaml).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.auth.access_token_ttl, 3600);
        assert_eq!(config.auth.refresh_token_ttl, 60 * 24 * 60 * 60);
        assert_eq!(config.rate_limit.rate, 5);
        assert_eq!(config.rate_limit.burst, 10);
        assert_eq!(config.policy.path, "config/rbac_policy.csv");
    }

    #[tokio::test]
    async fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "server:\n  port: 9090\nauth:\n  jwt_secret: \"{}\"\nrate_limit:\n  trust_forwarded_for: true",
            TEST_SECRET
        )
        .unwrap();

        let config = Config::from_file(file.path()).await.unwrap();
        assert_eq!(config.server.port, 9090);
        assert!(config.rate_limit.trust_forwarded_for);
    }

    #[tokio::test]
    async fn test_missing_file_is_config_error() {
        let err = Config::from_file("/nonexistent/bugby.yaml").await.unwrap_err();
        assert!(err.to_string().starts_with("Configuration error"));
    }

    #[tokio::test]
    async fn test_shipped_policy_parses() {
        let policy = bugby_rs::auth::policy::FilePolicyEngine::load(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/config/rbac_policy.csv"
        ))
        .await
        .unwrap();
        assert_eq!(policy.rule_count(), 5);
    }
}
