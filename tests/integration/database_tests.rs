//! Database integration tests
//!
//! Tests database operations using a real in-memory SQLite database.

#[cfg(test)]
mod tests {
    use crate::common::{TestDatabase, UserFactory};
    use bugby_rs::ApiError;
    use bugby_rs::auth::RoleLookup;
    use bugby_rs::core::models::{Bug, BugPatch};
    use uuid::Uuid;

    #[tokio::test]
    async fn test_database_health_check() {
        let db = TestDatabase::new().await;
        let health = db.db().health_check().await;
        assert!(health.is_ok(), "Health check failed: {:?}", health.err());
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let db = TestDatabase::new().await;
        let result = db.db().migrate().await;
        assert!(result.is_ok(), "Migration failed: {:?}", result.err());
    }

    #[tokio::test]
    async fn test_create_and_find_user() {
        let db = TestDatabase::new().await;
        let user = UserFactory::with_email("alice@example.com");

        db.db().create_user(&user).await.unwrap();

        let by_email = db
            .db()
            .find_user_by_email("alice@example.com")
            .await
            .unwrap()
            .expect("user should exist");
        assert_eq!(by_email.id, user.id);
        assert_eq!(by_email.role, "user");

        let by_id = db.db().find_user_by_id(user.id).await.unwrap();
        assert_eq!(by_id.map(|u| u.email), Some("alice@example.com".to_string()));

        assert!(
            db.db()
                .find_user_by_email("nobody@example.com")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let db = TestDatabase::new().await;
        db.db()
            .create_user(&UserFactory::with_email("dup@example.com"))
            .await
            .unwrap();

        let err = db
            .db()
            .create_user(&UserFactory::with_email("dup@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_update_user_credentials() {
        let db = TestDatabase::new().await;
        let user = UserFactory::create();
        db.db().create_user(&user).await.unwrap();

        let updated = db
            .db()
            .update_user_credentials(user.id, "new@example.com", "new_hash")
            .await
            .unwrap();
        assert_eq!(updated.email, "new@example.com");
        assert_eq!(updated.hashed_password, "new_hash");

        let err = db
            .db()
            .update_user_credentials(Uuid::new_v4(), "x@example.com", "h")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_role_lookup_reads_current_role() {
        let db = TestDatabase::new().await;
        let user = UserFactory::create();
        db.db().create_user(&user).await.unwrap();

        assert_eq!(db.db().role_by_id(user.id).await.unwrap(), "user");

        db.db().update_user_role(user.id, "admin").await.unwrap();
        assert_eq!(db.db().role_by_id(user.id).await.unwrap(), "admin");

        let err = db.db().role_by_id(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_bug_lifecycle() {
        let db = TestDatabase::new().await;
        let author = UserFactory::create();
        db.db().create_user(&author).await.unwrap();

        let bug = Bug::new("Crash".into(), "Crashes on start".into(), author.id);
        db.db().create_bug(&bug).await.unwrap();

        let bugs = db.db().list_bugs().await.unwrap();
        assert_eq!(bugs.len(), 1);
        assert_eq!(bugs[0].id, bug.id);

        let patch = BugPatch {
            title: Some("Crash on start".into()),
            description: None,
        };
        let updated = db.db().update_bug(bug.id, patch).await.unwrap();
        assert_eq!(updated.title, "Crash on start");
        assert_eq!(updated.description, "Crashes on start");
        assert_eq!(updated.posted_by, author.id);

        db.db().delete_bug(bug.id).await.unwrap();
        assert!(db.db().find_bug_by_id(bug.id).await.unwrap().is_none());

        let err = db.db().delete_bug(bug.id).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
