use sea_orm::Set;
use sea_orm::entity::prelude::*;

/// Refresh token database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "refresh_tokens")]
pub struct Model {
    /// Opaque token value
    #[sea_orm(primary_key, auto_increment = false)]
    pub token: String,

    /// Owning user
    pub user_id: Uuid,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,

    pub expires_at: DateTimeWithTimeZone,

    /// Set once on revocation, never cleared
    pub revoked_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn to_domain_token(&self) -> crate::auth::refresh_token::RefreshToken {
        crate::auth::refresh_token::RefreshToken {
            token: self.token.clone(),
            user_id: self.user_id,
            created_at: self.created_at.to_utc(),
            updated_at: self.updated_at.to_utc(),
            expires_at: self.expires_at.to_utc(),
            revoked_at: self.revoked_at.map(|dt| dt.to_utc()),
        }
    }

    pub fn from_domain_token(token: &crate::auth::refresh_token::RefreshToken) -> ActiveModel {
        ActiveModel {
            token: Set(token.token.clone()),
            user_id: Set(token.user_id),
            created_at: Set(token.created_at.into()),
            updated_at: Set(token.updated_at.into()),
            expires_at: Set(token.expires_at.into()),
            revoked_at: Set(token.revoked_at.map(Into::into)),
        }
    }
}
