//! HTTP response handling for errors

use super::types::ApiError;
use crate::auth::jwt::TokenError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};

const OPAQUE_INTERNAL_MESSAGE: &str = "internal server error";

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated(_) | ApiError::CredentialMismatch => StatusCode::UNAUTHORIZED,
            ApiError::Token(TokenError::Signing(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Token(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::DuplicateToken
            | ApiError::PolicyEngine(_)
            | ApiError::Hash(_)
            | ApiError::Config(_)
            | ApiError::Database(_)
            | ApiError::Serialization(_)
            | ApiError::Yaml(_)
            | ApiError::Io(_)
            | ApiError::Timeout(_)
            | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = match self {
            ApiError::PolicyEngine(_) => "error during enforcement".to_string(),
            _ if status.is_server_error() => OPAQUE_INTERNAL_MESSAGE.to_string(),
            _ => self.to_string(),
        };

        HttpResponse::build(status).json(ErrorResponse {
            code: status.as_u16(),
            error: message,
        })
    }
}

/// Standard error envelope: `{"code": <int>, "error": <string>}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub error: String,
}
