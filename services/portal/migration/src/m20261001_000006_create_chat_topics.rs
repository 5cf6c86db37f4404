use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ChatTopics::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ChatTopics::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(ChatTopics::UserId).uuid().not_null())
                    .col(ColumnDef::new(ChatTopics::ProductId).uuid().not_null())
                    .col(ColumnDef::new(ChatTopics::Title).string().not_null())
                    .col(
                        ColumnDef::new(ChatTopics::Status)
                            .string()
                            .not_null()
                            .default("open"),
                    )
                    .col(
                        ColumnDef::new(ChatTopics::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ChatTopics::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ChatTopics::Table, ChatTopics::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ChatTopics::Table, ChatTopics::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_chat_topics_user_product_updated")
                    .table(ChatTopics::Table)
                    .col(ChatTopics::UserId)
                    .col(ChatTopics::ProductId)
                    .col(ChatTopics::UpdatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ChatTopics::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ChatTopics {
    Table,
    Id,
    UserId,
    ProductId,
    Title,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Products {
    Table,
    Id,
}
