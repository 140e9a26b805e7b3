//! Authorization middleware

use super::helpers::reject;
use crate::auth::IdentityContext;
use crate::auth::policy::PolicyEngine;
use crate::utils::error::{ApiError, Result as ApiResult};
use actix_web::HttpMessage;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use futures::future::{Ready, ready};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;
use tracing::debug;

/// Policy gate for Actix-web; must sit inside [`AuthMiddleware`](super::AuthMiddleware)
#[derive(Clone)]
pub struct AuthorizationMiddleware {
    policy: Arc<dyn PolicyEngine>,
}

impl AuthorizationMiddleware {
    pub fn new(policy: Arc<dyn PolicyEngine>) -> Self {
        Self { policy }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthorizationMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = AuthorizationMiddlewareService<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthorizationMiddlewareService {
            service: Rc::new(service),
            policy: self.policy.clone(),
        }))
    }
}

/// Service implementation for authorization middleware
pub struct AuthorizationMiddlewareService<S> {
    service: Rc<S>,
    policy: Arc<dyn PolicyEngine>,
}

impl<S, B> Service<ServiceRequest> for AuthorizationMiddlewareService<S>
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
        let decision = authorize(&req, self.policy.as_ref());
        let service = self.service.clone();

        Box::pin(async move {
            if let Err(e) = decision {
                return Ok(reject(req, e));
            }

            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}

fn authorize(req: &ServiceRequest, policy: &dyn PolicyEngine) -> ApiResult<()> {
    let role = req
        .extensions()
        .get::<IdentityContext>()
        .map(|identity| identity.role.clone())
        .filter(|role| !role.is_empty())
        .ok_or_else(|| ApiError::unauthenticated("missing or invalid role in context"))?;

    let resource = req.path();
    let action = req.method().as_str().to_lowercase();

    if policy.enforce(&role, resource, &action)? {
        debug!(role = %role, path = %resource, method = %action, "access granted");
        Ok(())
    } else {
        Err(ApiError::forbidden("Access denied"))
    }
}
