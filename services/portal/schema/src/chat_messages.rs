use sea_orm::entity::prelude::*;

/// `sender_type` is `"client"` or `"support"`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "chat_messages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub chat_topic_id: Uuid,
    pub sender_type: String,
    pub sender_id: Uuid,
    pub message: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::chat_topics::Entity",
        from = "Column::ChatTopicId",
        to = "super::chat_topics::Column::Id",
        on_delete = "Cascade"
    )]
    ChatTopic,
}

impl Related<super::chat_topics::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChatTopic.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
