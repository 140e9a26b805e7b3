//! Refresh token store integration tests

#[cfg(test)]
mod tests {
    use crate::common::{TestDatabase, UserFactory};
    use bugby_rs::ApiError;
    use bugby_rs::auth::refresh_token::{
        RefreshToken, RefreshTokenState, RefreshTokenStore, issue_refresh_token,
    };
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    async fn db_with_user() -> (TestDatabase, Uuid) {
        let db = TestDatabase::new().await;
        let user = UserFactory::create();
        db.db().create_user(&user).await.unwrap();
        (db, user.id)
    }

    #[tokio::test]
    async fn test_create_and_fetch() {
        let (db, user_id) = db_with_user().await;
        let token = RefreshToken::new("a".repeat(64), user_id, Duration::days(60));

        db.db().create_refresh_token(&token).await.unwrap();

        let fetched = db
            .db()
            .fetch_refresh_token(&token.token)
            .await
            .unwrap()
            .expect("token should exist");
        assert_eq!(fetched.user_id, user_id);
        assert!(fetched.revoked_at.is_none());
        assert!(fetched.is_usable_at(Utc::now()));
    }

    #[tokio::test]
    async fn test_unknown_token_is_none() {
        let (db, _) = db_with_user().await;
        assert!(db.db().fetch_refresh_token("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_value_is_reported() {
        let (db, user_id) = db_with_user().await;
        let token = RefreshToken::new("b".repeat(64), user_id, Duration::days(60));

        db.db().create_refresh_token(&token).await.unwrap();
        let err = db.db().create_refresh_token(&token).await.unwrap_err();
        assert!(matches!(err, ApiError::DuplicateToken), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_revoke_is_idempotent() {
        let (db, user_id) = db_with_user().await;
        let token = RefreshToken::new("c".repeat(64), user_id, Duration::days(60));
        db.db().create_refresh_token(&token).await.unwrap();

        db.db().revoke_refresh_token(&token.token).await.unwrap();
        let first = db
            .db()
            .fetch_refresh_token(&token.token)
            .await
            .unwrap()
            .unwrap();
        assert!(first.revoked_at.is_some());
        assert_eq!(first.state_at(Utc::now()), RefreshTokenState::Revoked);

        db.db().revoke_refresh_token(&token.token).await.unwrap();
        let second = db
            .db()
            .fetch_refresh_token(&token.token)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(second.revoked_at, first.revoked_at);

        // unknown tokens are not an error either
        db.db().revoke_refresh_token("missing").await.unwrap();
    }

    #[tokio::test]
    async fn test_issue_refresh_token_persists() {
        let (db, user_id) = db_with_user().await;

        let issued = issue_refresh_token(db.db(), user_id, Duration::days(60))
            .await
            .unwrap();
        assert_eq!(issued.token.len(), 64);

        let stored = db.db().fetch_refresh_token(&issued.token).await.unwrap();
        assert_eq!(stored.map(|t| t.user_id), Some(user_id));
    }
}
