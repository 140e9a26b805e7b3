//! Bug endpoints

use super::{Gates, parse_id};
use crate::auth::IdentityContext;
use crate::core::models::{Bug, BugPatch};
use crate::server::state::AppState;
use crate::utils::error::ApiError;
use actix_web::{HttpResponse, Result as ActixResult, guard, web};
use serde::Deserialize;
use tracing::info;

const ADMIN_ROLE: &str = "admin";

/// Configure bug routes
pub fn configure_routes(cfg: &mut web::ServiceConfig, gates: &Gates) {
    cfg.service(
        web::resource("/bugs")
            .guard(guard::Get())
            .route(web::get().to(list_bugs)),
    )
    .service(
        web::resource("/bugs")
            .guard(guard::Post())
            .wrap(gates.authorization.clone())
            .wrap(gates.access.clone())
            .route(web::post().to(create_bug)),
    )
    .service(
        web::resource("/bugs/{bugid}")
            .guard(guard::Get())
            .route(web::get().to(get_bug)),
    )
    .service(
        web::resource("/bugs/{bugid}")
            .guard(guard::Any(guard::Post()).or(guard::Delete()))
            .wrap(gates.authorization.clone())
            .wrap(gates.access.clone())
            .route(web::post().to(update_bug))
            .route(web::delete().to(delete_bug)),
    );
}

#[derive(Debug, Deserialize)]
pub struct NewBug {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

pub async fn list_bugs(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let bugs = state.database.list_bugs().await?;
    Ok(HttpResponse::Ok().json(bugs))
}

pub async fn get_bug(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let bug_id = parse_id(&path, "bug")?;
    let bug = state
        .database
        .find_bug_by_id(bug_id)
        .await?
        .ok_or_else(|| ApiError::not_found("bug not found"))?;

    Ok(HttpResponse::Ok().json(bug))
}

pub async fn create_bug(
    state: web::Data<AppState>,
    identity: IdentityContext,
    request: web::Json<NewBug>,
) -> ActixResult<HttpResponse> {
    let request = request.into_inner();
    if request.title.trim().is_empty() {
        return Err(ApiError::bad_request("title field required").into());
    }

    let bug = Bug::new(request.title, request.description, identity.user_id);
    let bug = state.database.create_bug(&bug).await?;

    info!(bug_id = %bug.id, user_id = %identity.user_id, "Bug created");
    Ok(HttpResponse::Created().json(bug))
}

/// Partial update; only the author may edit a bug
pub async fn update_bug(
    state: web::Data<AppState>,
    identity: IdentityContext,
    path: web::Path<String>,
    request: web::Json<BugPatch>,
) -> ActixResult<HttpResponse> {
    let bug_id = parse_id(&path, "bug")?;
    let patch = request.into_inner();
    if patch.is_empty() {
        return Err(ApiError::bad_request("nothing to update").into());
    }

    let bug = state
        .database
        .find_bug_by_id(bug_id)
        .await?
        .ok_or_else(|| ApiError::not_found("bug not found"))?;
    if bug.posted_by != identity.user_id {
        return Err(ApiError::forbidden("you can only edit your own bugs").into());
    }

    let bug = state.database.update_bug(bug_id, patch).await?;

    info!(bug_id = %bug.id, user_id = %identity.user_id, "Bug updated");
    Ok(HttpResponse::Ok().json(bug))
}

/// Authors may delete their own bugs, admins any bug
pub async fn delete_bug(
    state: web::Data<AppState>,
    identity: IdentityContext,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let bug_id = parse_id(&path, "bug")?;

    let bug = state
        .database
        .find_bug_by_id(bug_id)
        .await?
        .ok_or_else(|| ApiError::not_found("bug not found"))?;
    if bug.posted_by != identity.user_id && identity.role != ADMIN_ROLE {
        return Err(ApiError::forbidden("you can only delete your own bugs").into());
    }

    state.database.delete_bug(bug_id).await?;

    info!(bug_id = %bug_id, user_id = %identity.user_id, "Bug deleted");
    Ok(HttpResponse::NoContent().finish())
}
