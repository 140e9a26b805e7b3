//! Account endpoints

use super::Gates;
use crate::auth::IdentityContext;
use crate::core::models::User;
use crate::server::state::AppState;
use crate::utils::auth::hash_password;
use crate::utils::error::{ApiError, Result};
use actix_web::{HttpResponse, Result as ActixResult, guard, web};
use serde::Deserialize;
use tracing::info;

/// Configure account routes
pub fn configure_routes(cfg: &mut web::ServiceConfig, gates: &Gates) {
    cfg.service(
        web::resource("/users")
            .guard(guard::Post())
            .route(web::post().to(create_user)),
    )
    .service(
        web::resource("/users")
            .guard(guard::Put())
            .wrap(gates.authorization.clone())
            .wrap(gates.access.clone())
            .route(web::put().to(update_user)),
    );
}

/// Email and password pair used by registration, login and account updates
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl Credentials {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.email.trim().is_empty() {
            return Err(ApiError::bad_request("email field required"));
        }
        if self.password.is_empty() {
            return Err(ApiError::bad_request("password field required"));
        }
        Ok(())
    }
}

/// Register a new account with the default role
pub async fn create_user(
    state: web::Data<AppState>,
    request: web::Json<Credentials>,
) -> ActixResult<HttpResponse> {
    let request = request.into_inner();
    request.validate()?;

    let hashed_password = hash_password(&request.password)?;
    let user = User::new(
        request.email.trim(),
        hashed_password,
        state.config.auth.default_role.as_str(),
    );
    let user = state.database.create_user(&user).await?;

    info!(user_id = %user.id, "account created");
    Ok(HttpResponse::Created().json(user.profile()))
}

/// Replace the caller's email and password
pub async fn update_user(
    state: web::Data<AppState>,
    identity: IdentityContext,
    request: web::Json<Credentials>,
) -> ActixResult<HttpResponse> {
    let request = request.into_inner();
    request.validate()?;

    let hashed_password = hash_password(&request.password)?;
    let user = state
        .database
        .update_user_credentials(identity.user_id, request.email.trim(), &hashed_password)
        .await?;

    info!(user_id = %user.id, "account updated");
    Ok(HttpResponse::Ok().json(user.profile()))
}
