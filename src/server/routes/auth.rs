//! Login and token endpoints

use super::Gates;
use super::users::Credentials;
use crate::auth::RefreshContext;
use crate::auth::refresh_token::issue_refresh_token;
use crate::core::models::UserProfile;
use crate::server::state::AppState;
use crate::utils::auth::{verify_password, verify_unknown_account};
use crate::utils::error::ApiError;
use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::Serialize;
use tracing::{info, warn};

/// Configure login and token routes
pub fn configure_routes(cfg: &mut web::ServiceConfig, gates: &Gates) {
    cfg.route("/login", web::post().to(login))
        .service(
            web::resource("/refresh")
                .wrap(gates.refresh.clone())
                .route(web::post().to(refresh)),
        )
        .service(
            web::resource("/revoke")
                .wrap(gates.revoke.clone())
                .route(web::post().to(revoke)),
        );
}

/// Profile plus both credentials
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub user: UserProfile,
    pub token: String,
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Exchange email and password for an access token and a refresh token
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<Credentials>,
) -> ActixResult<HttpResponse> {
    let request = request.into_inner();

    let user = match state.database.find_user_by_email(request.email.trim()).await? {
        Some(user) => user,
        None => {
            warn!("Login attempt for unknown account");
            verify_unknown_account(&request.password)?;
            return Err(ApiError::CredentialMismatch.into());
        }
    };

    if let Err(e) = verify_password(&request.password, &user.hashed_password) {
        warn!(user_id = %user.id, "Login attempt with invalid password");
        return Err(e.into());
    }

    let token = state
        .jwt
        .issue(user.id, state.config.auth.access_token_ttl())
        .map_err(ApiError::from)?;
    let refresh_token = issue_refresh_token(
        state.tokens.as_ref(),
        user.id,
        state.config.auth.refresh_token_ttl(),
    )
    .await?;

    info!(user_id = %user.id, "User logged in");
    Ok(HttpResponse::Ok().json(LoginResponse {
        user: user.profile(),
        token,
        refresh_token: refresh_token.token,
    }))
}

/// Mint a new access token for the owner of a usable refresh token
pub async fn refresh(
    state: web::Data<AppState>,
    context: RefreshContext,
) -> ActixResult<HttpResponse> {
    let token = state
        .jwt
        .issue(context.user_id, state.config.auth.access_token_ttl())
        .map_err(ApiError::from)?;

    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}

/// Revoke the presented refresh token; repeating the call is harmless
pub async fn revoke(
    state: web::Data<AppState>,
    context: RefreshContext,
) -> ActixResult<HttpResponse> {
    state
        .tokens
        .revoke_refresh_token(&context.refresh_token)
        .await?;

    info!(user_id = %context.user_id, "Refresh token revoked");
    Ok(HttpResponse::NoContent().finish())
}
