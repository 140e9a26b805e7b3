use crate::auth::RoleLookup;
use crate::core::models::User;
use crate::utils::error::{ApiError, Result};
use async_trait::async_trait;
use sea_orm::*;
use tracing::debug;
use uuid::Uuid;

use super::super::entities::{self, user};
use super::types::{SeaOrmDatabase, is_unique_violation};

impl SeaOrmDatabase {
    /// Find user by ID
    pub async fn find_user_by_id(&self, user_id: Uuid) -> Result<Option<User>> {
        debug!("Finding user by ID: {}", user_id);

        let user_model = entities::User::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(ApiError::Database)?;

        Ok(user_model.map(|model| model.to_domain_user()))
    }

    /// Find user by email
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        debug!("Finding user by email");

        let user_model = entities::User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(ApiError::Database)?;

        Ok(user_model.map(|model| model.to_domain_user()))
    }

    /// Create a new user; a taken email is a conflict
    pub async fn create_user(&self, user: &User) -> Result<User> {
        debug!("Creating user: {}", user.id);

        entities::User::insert(user::Model::from_domain_user(user))
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    ApiError::conflict("user with this email already exists")
                } else {
                    ApiError::Database(e)
                }
            })?;

        Ok(user.clone())
    }

    /// Replace the email and password hash of an account
    pub async fn update_user_credentials(
        &self,
        user_id: Uuid,
        email: &str,
        hashed_password: &str,
    ) -> Result<User> {
        debug!("Updating credentials for user: {}", user_id);

        let mut active_model: user::ActiveModel = entities::User::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(ApiError::Database)?
            .ok_or_else(|| ApiError::not_found("user not found"))?
            .into();

        active_model.email = Set(email.to_string());
        active_model.hashed_password = Set(hashed_password.to_string());
        active_model.updated_at = Set(chrono::Utc::now().into());

        let updated = active_model.update(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::conflict("user with this email already exists")
            } else {
                ApiError::Database(e)
            }
        })?;

        Ok(updated.to_domain_user())
    }

    /// Change the role of an account
    pub async fn update_user_role(&self, user_id: Uuid, role: &str) -> Result<()> {
        debug!("Setting role '{}' for user: {}", role, user_id);

        let mut active_model: user::ActiveModel = entities::User::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(ApiError::Database)?
            .ok_or_else(|| ApiError::not_found("user not found"))?
            .into();

        active_model.role = Set(role.to_string());
        active_model.updated_at = Set(chrono::Utc::now().into());
        active_model.update(&self.db).await.map_err(ApiError::Database)?;

        Ok(())
    }
}

#[async_trait]
impl RoleLookup for SeaOrmDatabase {
    async fn role_by_id(&self, user_id: Uuid) -> Result<String> {
        self.find_user_by_id(user_id)
            .await?
            .map(|user| user.role)
            .ok_or_else(|| ApiError::not_found("user not found"))
    }
}
