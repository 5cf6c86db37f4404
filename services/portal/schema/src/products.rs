use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub area_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub has_video: bool,
    pub has_pdf: bool,
    pub video_url: Option<String>,
    pub pdf_url: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::areas::Entity",
        from = "Column::AreaId",
        to = "super::areas::Column::Id",
        on_delete = "Cascade"
    )]
    Area,
    #[sea_orm(has_many = "super::training_topics::Entity")]
    TrainingTopics,
    #[sea_orm(has_many = "super::faqs::Entity")]
    Faqs,
    #[sea_orm(has_many = "super::chat_topics::Entity")]
    ChatTopics,
}

impl Related<super::areas::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Area.def()
    }
}

impl Related<super::training_topics::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TrainingTopics.def()
    }
}

impl Related<super::faqs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Faqs.def()
    }
}

impl Related<super::chat_topics::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChatTopics.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
