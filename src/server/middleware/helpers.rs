//! Helper functions for middleware

use super::request_id::RequestId;
use crate::utils::error::{ApiError, Result};
use actix_web::body::EitherBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{HttpMessage, HttpRequest, ResponseError};
use tracing::{error, warn};

/// Extract the credential from `Authorization: Bearer <token>`.
///
/// The header must split on single spaces into exactly two parts, the first being `Bearer`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthenticated("no header"))?
        .to_str()
        .map_err(|_| ApiError::unauthenticated("malformed token"))?;

    if header.is_empty() {
        return Err(ApiError::unauthenticated("no header"));
    }

    let parts: Vec<&str> = header.split(' ').collect();
    match parts.as_slice() {
        ["Bearer", token] => Ok(token),
        [_, _] => Err(ApiError::unauthenticated("header must contain bearer")),
        _ => Err(ApiError::unauthenticated("malformed token")),
    }
}

/// Request id stamped by [`RequestIdMiddleware`](super::RequestIdMiddleware), if any
pub fn request_id(req: &HttpRequest) -> String {
    req.extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_else(|| "-".to_string())
}

/// Rate-limit key for a request: the raw peer address, or the forwarded client address
pub fn client_key(req: &ServiceRequest, trust_forwarded_for: bool) -> String {
    if trust_forwarded_for {
        if let Some(addr) = req.connection_info().realip_remote_addr() {
            return addr.to_string();
        }
    }

    req.peer_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Short-circuit a request with the error envelope; the inner service is not called
pub(super) fn reject<B>(req: ServiceRequest, err: ApiError) -> ServiceResponse<EitherBody<B>> {
    let request_id = request_id(req.request());

    if err.is_internal() {
        error!(
            request_id = %request_id,
            method = %req.method(),
            path = %req.path(),
            "request rejected: {}",
            err
        );
    } else {
        warn!(
            request_id = %request_id,
            method = %req.method(),
            path = %req.path(),
            "request rejected: {}",
            err
        );
    }

    let response = err.error_response();
    req.into_response(response).map_into_right_body()
}
