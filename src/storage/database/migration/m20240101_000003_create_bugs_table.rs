use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bugs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Bugs::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Bugs::Title).string().not_null())
                    .col(ColumnDef::new(Bugs::Description).text().not_null())
                    .col(ColumnDef::new(Bugs::PostedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(Bugs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Bugs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bugs_posted_by")
                            .from(Bugs::Table, Bugs::PostedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_bugs_posted_by")
                    .table(Bugs::Table)
                    .col(Bugs::PostedBy)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bugs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Bugs {
    Table,
    Id,
    Title,
    Description,
    PostedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
