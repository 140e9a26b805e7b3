use sea_orm::Set;
use sea_orm::entity::prelude::*;

/// Bug database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "bugs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// Author
    pub posted_by: Uuid,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::PostedBy",
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
    pub fn to_domain_bug(&self) -> crate::core::models::Bug {
        crate::core::models::Bug {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            posted_by: self.posted_by,
            created_at: self.created_at.to_utc(),
            updated_at: self.updated_at.to_utc(),
        }
    }

    pub fn from_domain_bug(bug: &crate::core::models::Bug) -> ActiveModel {
        ActiveModel {
            id: Set(bug.id),
            title: Set(bug.title.clone()),
            description: Set(bug.description.clone()),
            posted_by: Set(bug.posted_by),
            created_at: Set(bug.created_at.into()),
            updated_at: Set(bug.updated_at.into()),
        }
    }
}
