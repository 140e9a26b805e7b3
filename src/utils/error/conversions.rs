//! Type conversions for ApiError

use super::types::ApiError;

impl From<tokio::time::error::Elapsed> for ApiError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        ApiError::Timeout("store call exceeded its deadline".to_string())
    }
}

impl From<argon2::password_hash::Error> for ApiError {
    fn from(err: argon2::password_hash::Error) -> Self {
        ApiError::Hash(err.to_string())
    }
}

impl From<actix_web::error::JsonPayloadError> for ApiError {
    fn from(err: actix_web::error::JsonPayloadError) -> Self {
        tracing::debug!("rejecting request body: {}", err);
        ApiError::BadRequest("invalid request body".to_string())
    }
}
