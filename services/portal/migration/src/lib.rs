use sea_orm_migration::prelude::*;

mod m20261001_000001_create_users;
mod m20261001_000002_create_areas;
mod m20261001_000003_create_products;
mod m20261001_000004_create_training_topics;
mod m20261001_000005_create_faqs;
mod m20261001_000006_create_chat_topics;
mod m20261001_000007_create_chat_messages;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_create_users::Migration),
            Box::new(m20261001_000002_create_areas::Migration),
            Box::new(m20261001_000003_create_products::Migration),
            Box::new(m20261001_000004_create_training_topics::Migration),
            Box::new(m20261001_000005_create_faqs::Migration),
            Box::new(m20261001_000006_create_chat_topics::Migration),
            Box::new(m20261001_000007_create_chat_messages::Migration),
        ]
    }
}
