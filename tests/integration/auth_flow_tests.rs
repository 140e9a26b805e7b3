//! End-to-end authentication and authorization flows over HTTP

#[cfg(test)]
mod tests {
    use crate::common::{TEST_POLICY, TEST_SECRET, test_config};
    use bugby_rs::auth::jwt::{Claims, ISSUER};
    use bugby_rs::auth::policy::FilePolicyEngine;
    use bugby_rs::server::{AppState, HttpServer};
    use bugby_rs::storage::SeaOrmDatabase;
    use bugby_rs::utils::error::ErrorResponse;
    use actix_web::body::MessageBody;
    use actix_web::dev::ServiceResponse;
    use actix_web::http::StatusCode;
    use actix_web::http::header::AUTHORIZATION;
    use actix_web::{test, web};
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde_json::{Value, json};
    use uuid::Uuid;

    async fn test_state() -> AppState {
        let config = test_config();
        let database = SeaOrmDatabase::new(&config.storage.database).await.unwrap();
        database.migrate().await.unwrap();
        let policy = FilePolicyEngine::from_policy_text(TEST_POLICY).unwrap();
        AppState::new(config, database, policy).unwrap()
    }

    async fn error_of<B: MessageBody>(resp: ServiceResponse<B>) -> (StatusCode, String) {
        let status = resp.status();
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.code, status.as_u16());
        (status, body.error)
    }

    /// Register and log in, yielding (user id, access token, refresh token)
    macro_rules! signup {
        ($app:expr, $email:expr) => {{
            let email: &str = $email;
            let credentials = json!({"email": email, "password": "hunter22"});

            let req = test::TestRequest::post()
                .uri("/api/users")
                .set_json(&credentials)
                .to_request();
            let resp = test::call_service($app, req).await;
            assert_eq!(resp.status(), StatusCode::CREATED);

            let req = test::TestRequest::post()
                .uri("/api/login")
                .set_json(&credentials)
                .to_request();
            let resp = test::call_service($app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);

            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["email"], email);
            assert!(body.get("hashed_password").is_none());

            (
                Uuid::parse_str(body["id"].as_str().unwrap()).unwrap(),
                body["token"].as_str().unwrap().to_string(),
                body["refresh_token"].as_str().unwrap().to_string(),
            )
        }};
    }

    fn bearer(token: &str) -> (actix_web::http::header::HeaderName, String) {
        (AUTHORIZATION, format!("Bearer {}", token))
    }

    #[actix_web::test]
    async fn test_register_validation_and_conflict() {
        let app = test::init_service(HttpServer::create_app(web::Data::new(test_state().await))).await;

        let req = test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({"email": "", "password": "pw"}))
            .to_request();
        let (status, error) = error_of(test::call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error, "email field required");

        signup!(&app, "carol@example.com");

        let req = test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({"email": "carol@example.com", "password": "other"}))
            .to_request();
        let (status, _) = error_of(test::call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn test_login_failures_look_identical() {
        let app = test::init_service(HttpServer::create_app(web::Data::new(test_state().await))).await;
        signup!(&app, "dave@example.com");

        let req = test::TestRequest::post()
            .uri("/api/login")
            .set_json(json!({"email": "dave@example.com", "password": "wrong"}))
            .to_request();
        let wrong_password = error_of(test::call_service(&app, req).await).await;

        let req = test::TestRequest::post()
            .uri("/api/login")
            .set_json(json!({"email": "nobody@example.com", "password": "wrong"}))
            .to_request();
        let unknown_user = error_of(test::call_service(&app, req).await).await;

        assert_eq!(
            wrong_password,
            (StatusCode::UNAUTHORIZED, "incorrect email or password".to_string())
        );
        assert_eq!(wrong_password, unknown_user);
    }

    #[actix_web::test]
    async fn test_protected_route_without_header() {
        let app = test::init_service(HttpServer::create_app(web::Data::new(test_state().await))).await;

        let req = test::TestRequest::post()
            .uri("/api/bugs")
            .set_json(json!({"title": "t", "description": "d"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"code": 401, "error": "no header"}));
    }

    #[actix_web::test]
    async fn test_expired_access_token() {
        let app = test::init_service(HttpServer::create_app(web::Data::new(test_state().await))).await;
        let (user_id, _, _) = signup!(&app, "erin@example.com");

        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            iss: ISSUER.to_string(),
            sub: user_id.to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let expired = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap();

        let req = test::TestRequest::post()
            .uri("/api/bugs")
            .insert_header(bearer(&expired))
            .set_json(json!({"title": "t", "description": "d"}))
            .to_request();
        let (status, error) = error_of(test::call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(error, "token has expired");
    }

    #[actix_web::test]
    async fn test_role_is_read_on_every_request() {
        let state = test_state().await;
        let database = state.database.clone();
        let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;
        let (user_id, token, _) = signup!(&app, "frank@example.com");

        let req = test::TestRequest::post()
            .uri("/api/bugs")
            .insert_header(bearer(&token))
            .set_json(json!({"title": "first", "description": "d"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

        // The same token loses access once the stored role changes
        database.update_user_role(user_id, "guest").await.unwrap();

        let req = test::TestRequest::post()
            .uri("/api/bugs")
            .insert_header(bearer(&token))
            .set_json(json!({"title": "second", "description": "d"}))
            .to_request();
        let (status, error) = error_of(test::call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(error, "Access denied");
    }

    #[actix_web::test]
    async fn test_refresh_and_revoke() {
        let app = test::init_service(HttpServer::create_app(web::Data::new(test_state().await))).await;
        let (_, _, refresh_token) = signup!(&app, "grace@example.com");

        let req = test::TestRequest::post()
            .uri("/api/refresh")
            .insert_header(bearer(&refresh_token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        let fresh = body["token"].as_str().unwrap().to_string();

        let req = test::TestRequest::put()
            .uri("/api/users")
            .insert_header(bearer(&fresh))
            .set_json(json!({"email": "grace@example.org", "password": "hunter23"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["email"], "grace@example.org");

        for _ in 0..2 {
            let req = test::TestRequest::post()
                .uri("/api/revoke")
                .insert_header(bearer(&refresh_token))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        }

        let req = test::TestRequest::post()
            .uri("/api/refresh")
            .insert_header(bearer(&refresh_token))
            .to_request();
        let (status, error) = error_of(test::call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(error, "refresh token revoked");
    }

    #[actix_web::test]
    async fn test_access_token_is_not_a_refresh_token() {
        let app = test::init_service(HttpServer::create_app(web::Data::new(test_state().await))).await;
        let (_, token, _) = signup!(&app, "heidi@example.com");

        let req = test::TestRequest::post()
            .uri("/api/refresh")
            .insert_header(bearer(&token))
            .to_request();
        let (status, error) = error_of(test::call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(error, "invalid refresh token");
    }

    #[actix_web::test]
    async fn test_bug_ownership() {
        let state = test_state().await;
        let database = state.database.clone();
        let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;
        let (_, author, _) = signup!(&app, "ivan@example.com");
        let (_, other, _) = signup!(&app, "judy@example.com");
        let (admin_id, admin, _) = signup!(&app, "root@example.com");
        database.update_user_role(admin_id, "admin").await.unwrap();

        let req = test::TestRequest::post()
            .uri("/api/bugs")
            .insert_header(bearer(&author))
            .set_json(json!({"title": "Broken", "description": "It broke"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let bug: Value = test::read_body_json(resp).await;
        let uri = format!("/api/bugs/{}", bug["bug_id"].as_str().unwrap());

        let req = test::TestRequest::get().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::post()
            .uri(&uri)
            .insert_header(bearer(&other))
            .set_json(json!({"title": "Hijacked"}))
            .to_request();
        let (status, _) = error_of(test::call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let req = test::TestRequest::post()
            .uri(&uri)
            .insert_header(bearer(&author))
            .set_json(json!({"title": "Still broken"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let updated: Value = test::read_body_json(resp).await;
        assert_eq!(updated["title"], "Still broken");
        assert_eq!(updated["description"], "It broke");

        let req = test::TestRequest::delete()
            .uri(&uri)
            .insert_header(bearer(&other))
            .to_request();
        let (status, _) = error_of(test::call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let req = test::TestRequest::delete()
            .uri(&uri)
            .insert_header(bearer(&admin))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get().uri(&uri).to_request();
        let (status, _) = error_of(test::call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
