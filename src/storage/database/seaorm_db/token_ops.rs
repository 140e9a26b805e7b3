use crate::auth::refresh_token::{RefreshToken, RefreshTokenStore};
use crate::utils::error::{ApiError, Result};
use async_trait::async_trait;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::*;
use tracing::debug;

use super::super::entities::{self, refresh_token};
use super::types::{SeaOrmDatabase, is_unique_violation};

#[async_trait]
impl RefreshTokenStore for SeaOrmDatabase {
    async fn create_refresh_token(&self, token: &RefreshToken) -> Result<()> {
        debug!("Storing refresh token for user: {}", token.user_id);

        entities::RefreshToken::insert(refresh_token::Model::from_domain_token(token))
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    ApiError::DuplicateToken
                } else {
                    ApiError::Database(e)
                }
            })?;

        Ok(())
    }

    async fn fetch_refresh_token(&self, token: &str) -> Result<Option<RefreshToken>> {
        let model = entities::RefreshToken::find_by_id(token.to_string())
            .one(&self.db)
            .await
            .map_err(ApiError::Database)?;

        Ok(model.map(|m| m.to_domain_token()))
    }

    async fn revoke_refresh_token(&self, token: &str) -> Result<()> {
        debug!("Revoking refresh token");

        let now = chrono::Utc::now();

        // Only the first revocation stamps the row.
        entities::RefreshToken::update_many()
            .col_expr(
                refresh_token::Column::RevokedAt,
                Expr::value(Some(DateTimeWithTimeZone::from(now))),
            )
            .col_expr(
                refresh_token::Column::UpdatedAt,
                Expr::value(DateTimeWithTimeZone::from(now)),
            )
            .filter(refresh_token::Column::Token.eq(token))
            .filter(refresh_token::Column::RevokedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(ApiError::Database)?;

        Ok(())
    }
}
