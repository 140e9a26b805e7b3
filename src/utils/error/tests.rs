//! Tests for error handling

use super::types::ApiError;
use super::ErrorResponse;
use crate::auth::jwt::TokenError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use actix_web::ResponseError;

async fn envelope(error: ApiError) -> (StatusCode, ErrorResponse) {
    let response = error.error_response();
    let status = response.status();
    let bytes = to_bytes(response.into_body()).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// ==================== Helper Function Tests ====================

#[test]
fn test_unauthenticated_helper() {
    let error = ApiError::unauthenticated("no header");
    assert!(matches!(error, ApiError::Unauthenticated(msg) if msg == "no header"));
}

#[test]
fn test_forbidden_helper() {
    let error = ApiError::forbidden("Access denied");
    assert!(matches!(error, ApiError::Forbidden(msg) if msg == "Access denied"));
}

#[test]
fn test_is_internal() {
    assert!(ApiError::policy_engine("boom").is_internal());
    assert!(ApiError::DuplicateToken.is_internal());
    assert!(ApiError::Token(TokenError::Signing("bad key".into())).is_internal());
    assert!(!ApiError::Token(TokenError::Expired).is_internal());
    assert!(!ApiError::rate_limited("slow down").is_internal());
}

// ==================== Response Envelope Tests ====================

#[tokio::test]
async fn test_unauthenticated_envelope() {
    let (status, body) = envelope(ApiError::unauthenticated("no header")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body,
        ErrorResponse {
            code: 401,
            error: "no header".to_string()
        }
    );
}

#[tokio::test]
async fn test_expired_token_envelope() {
    let (status, body) = envelope(ApiError::from(TokenError::Expired)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body.error, "token has expired");
}

#[tokio::test]
async fn test_forbidden_envelope() {
    let (status, body) = envelope(ApiError::forbidden("Access denied")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body.code, 403);
    assert_eq!(body.error, "Access denied");
}

#[tokio::test]
async fn test_rate_limited_envelope() {
    let (status, body) = envelope(ApiError::rate_limited("Rate limit Exceeded")).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body.code, 429);
}

#[tokio::test]
async fn test_policy_engine_error_is_opaque() {
    let (status, body) = envelope(ApiError::policy_engine("regex compile failed at /x")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.error, "error during enforcement");
}

#[tokio::test]
async fn test_internal_errors_do_not_leak_detail() {
    let (status, body) = envelope(ApiError::Token(TokenError::Signing(
        "secret bytes 0xdeadbeef".to_string(),
    )))
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.error.contains("deadbeef"));

    let (_, body) = envelope(ApiError::hash("salt generation failed")).await;
    assert_eq!(body.error, "internal server error");
}

#[tokio::test]
async fn test_credential_mismatch_envelope() {
    let (status, body) = envelope(ApiError::CredentialMismatch).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body.error, "incorrect email or password");
}
