//! Authentication middleware, access-token mode

use super::helpers::{bearer_token, reject};
use crate::auth::jwt::JwtHandler;
use crate::auth::{IdentityContext, RoleLookup};
use crate::utils::error::{ApiError, Result as ApiResult};
use actix_web::HttpMessage;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use futures::future::{Ready, ready};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

/// Access-token gate for Actix-web
///
/// Verifies the bearer access token, fetches the subject's current role and attaches an
/// [`IdentityContext`] to the request.
#[derive(Clone)]
pub struct AuthMiddleware {
    jwt: Arc<JwtHandler>,
    roles: Arc<dyn RoleLookup>,
    store_timeout: Duration,
}

impl AuthMiddleware {
    pub fn new(jwt: Arc<JwtHandler>, roles: Arc<dyn RoleLookup>, store_timeout: Duration) -> Self {
        Self {
            jwt,
            roles,
            store_timeout,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            jwt: self.jwt.clone(),
            roles: self.roles.clone(),
            store_timeout: self.store_timeout,
        }))
    }
}

/// Service implementation for auth middleware
pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
    jwt: Arc<JwtHandler>,
    roles: Arc<dyn RoleLookup>,
    store_timeout: Duration,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
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
        let jwt = self.jwt.clone();
        let roles = self.roles.clone();
        let store_timeout = self.store_timeout;

        Box::pin(async move {
            let identity = match authenticate(&req, &jwt, roles.as_ref(), store_timeout).await {
                Ok(identity) => identity,
                Err(e) => return Ok(reject(req, e)),
            };

            debug!(user_id = %identity.user_id, role = %identity.role, "access token accepted");
            req.extensions_mut().insert(identity);

            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}

async fn authenticate(
    req: &ServiceRequest,
    jwt: &JwtHandler,
    roles: &dyn RoleLookup,
    store_timeout: Duration,
) -> ApiResult<IdentityContext> {
    let token = bearer_token(req.headers())?.to_string();
    let user_id = jwt.verify(&token)?;
    let role = fetch_role(roles, user_id, store_timeout).await?;

    Ok(IdentityContext {
        user_id,
        role,
        access_token: token,
    })
}

async fn fetch_role(roles: &dyn RoleLookup, user_id: Uuid, store_timeout: Duration) -> ApiResult<String> {
    match tokio::time::timeout(store_timeout, roles.role_by_id(user_id)).await {
        Ok(Ok(role)) => Ok(role),
        Ok(Err(e)) => {
            warn!(user_id = %user_id, "role lookup failed: {}", e);
            Err(ApiError::unauthenticated("unable to fetch role"))
        }
        Err(_) => {
            warn!(user_id = %user_id, "role lookup timed out after {:?}", store_timeout);
            Err(ApiError::unauthenticated("unable to fetch role"))
        }
    }
}
