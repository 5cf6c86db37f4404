use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TrainingTopics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TrainingTopics::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TrainingTopics::ProductId).uuid().not_null())
                    .col(ColumnDef::new(TrainingTopics::Topic).string().not_null())
                    .col(ColumnDef::new(TrainingTopics::Info).text().null())
                    .col(ColumnDef::new(TrainingTopics::Content).text().null())
                    .col(
                        ColumnDef::new(TrainingTopics::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(TrainingTopics::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TrainingTopics::Table, TrainingTopics::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TrainingTopics::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum TrainingTopics {
    Table,
    Id,
    ProductId,
    Topic,
    Info,
    Content,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Products {
    Table,
    Id,
}
