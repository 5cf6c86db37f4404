use sea_orm::entity::prelude::*;

/// Portal account. `firebase_uid` stays NULL until the identity provider
/// subject is linked; the flags are legacy 0/1 SMALLINT columns.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub firebase_uid: Option<String>,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub is_service_center: i16,
    pub is_activated: i16,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::chat_topics::Entity")]
    ChatTopics,
}

impl Related<super::chat_topics::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChatTopics.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
