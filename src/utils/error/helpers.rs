//! Helper functions for creating specific error types

use super::types::ApiError;

impl ApiError {
    pub fn unauthenticated<S: Into<String>>(message: S) -> Self {
        Self::Unauthenticated(message.into())
    }

    pub fn forbidden<S: Into<String>>(message: S) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn rate_limited<S: Into<String>>(message: S) -> Self {
        Self::RateLimited(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn conflict<S: Into<String>>(message: S) -> Self {
        Self::Conflict(message.into())
    }

    pub fn policy_engine<S: Into<String>>(message: S) -> Self {
        Self::PolicyEngine(message.into())
    }

    pub fn hash<S: Into<String>>(message: S) -> Self {
        Self::Hash(message.into())
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Whether the error is attributable to the server rather than the caller
    pub fn is_internal(&self) -> bool {
        use actix_web::ResponseError;
        self.status_code().is_server_error()
    }
}
