//! Authentication middleware, refresh-token mode

use super::helpers::{bearer_token, reject};
use crate::auth::RefreshContext;
use crate::auth::refresh_token::{RefreshTokenState, RefreshTokenStore};
use crate::utils::error::{ApiError, Result as ApiResult};
use actix_web::HttpMessage;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use chrono::Utc;
use futures::future::{Ready, ready};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

/// How the gate treats a token that is already revoked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevokedTokens {
    /// 401 "refresh token revoked"
    Reject,
    /// Let the request through so revocation stays idempotent
    Allow,
}

/// Refresh-token gate for Actix-web
///
/// Looks the bearer value up in the refresh token store and attaches a [`RefreshContext`]
/// for usable tokens.
#[derive(Clone)]
pub struct RefreshAuthMiddleware {
    store: Arc<dyn RefreshTokenStore>,
    revoked: RevokedTokens,
    store_timeout: Duration,
}

impl RefreshAuthMiddleware {
    pub fn new(
        store: Arc<dyn RefreshTokenStore>,
        revoked: RevokedTokens,
        store_timeout: Duration,
    ) -> Self {
        Self {
            store,
            revoked,
            store_timeout,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RefreshAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RefreshAuthMiddlewareService<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RefreshAuthMiddlewareService {
            service: Rc::new(service),
            store: self.store.clone(),
            revoked: self.revoked,
            store_timeout: self.store_timeout,
        }))
    }
}

/// Service implementation for refresh auth middleware
pub struct RefreshAuthMiddlewareService<S> {
    service: Rc<S>,
    store: Arc<dyn RefreshTokenStore>,
    revoked: RevokedTokens,
    store_timeout: Duration,
}

impl<S, B> Service<ServiceRequest> for RefreshAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = std::result::Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let store = self.store.clone();
        let revoked = self.revoked;
        let store_timeout = self.store_timeout;

        Box::pin(async move {
            let context = match authenticate(&req, store.as_ref(), revoked, store_timeout).await {
                Ok(context) => context,
                Err(e) => return Ok(reject(req, e)),
            };

            debug!(user_id = %context.user_id, "refresh token accepted");
            req.extensions_mut().insert(context);

            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}

async fn authenticate(
    req: &ServiceRequest,
    store: &dyn RefreshTokenStore,
    revoked: RevokedTokens,
    store_timeout: Duration,
) -> ApiResult<RefreshContext> {
    let token = bearer_token(req.headers())?.to_string();

    let record = match tokio::time::timeout(store_timeout, store.fetch_refresh_token(&token)).await
    {
        Ok(Ok(Some(record))) => record,
        Ok(Ok(None)) | Ok(Err(ApiError::NotFound(_))) => {
            return Err(ApiError::unauthenticated("invalid refresh token"));
        }
        Ok(Err(e)) => {
            error!("refresh token lookup failed: {}", e);
            return Err(e);
        }
        Err(elapsed) => return Err(elapsed.into()),
    };

    match record.state_at(Utc::now()) {
        RefreshTokenState::Revoked if revoked == RevokedTokens::Reject => {
            return Err(ApiError::unauthenticated("refresh token revoked"));
        }
        RefreshTokenState::Expired => {
            return Err(ApiError::unauthenticated("refresh token expired"));
        }
        _ => {}
    }

    Ok(RefreshContext {
        user_id: record.user_id,
        refresh_token: token,
    })
}
