use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, Insert,
    QueryFilter, QueryOrder, TransactionTrait, UpdateMany,
    sea_query::{Expr, OnConflict},
};
use uuid::Uuid;

use megalabs_portal_schema::{
    areas, chat_messages, chat_topics, faqs, products, training_topics, users,
};

use crate::domain::repository::{CatalogRepository, ChatRepository, UserRepository};
use crate::domain::types::{
    Area, ChatMessage, ChatStatus, ChatTopic, Faq, Product, ProfileChanges, SenderType,
    TrainingTopic, User,
};
use crate::error::PortalError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_subject(&self, subject: &str) -> Result<Option<User>, PortalError> {
        let model = users::Entity::find()
            .filter(users::Column::FirebaseUid.eq(subject))
            .one(&self.db)
            .await
            .context("find user by subject")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, PortalError> {
        // Email is not unique in legacy data; the oldest row wins.
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .order_by_asc(users::Column::CreatedAt)
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn find_unlinked_by_email(&self, email: &str) -> Result<Option<User>, PortalError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .filter(users::Column::FirebaseUid.is_null())
            .order_by_asc(users::Column::CreatedAt)
            .one(&self.db)
            .await
            .context("find unlinked user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn update_by_subject(
        &self,
        subject: &str,
        changes: &ProfileChanges,
    ) -> Result<Option<User>, PortalError> {
        let rows = update_by_subject_stmt(subject, changes)
            .exec_with_returning(&self.db)
            .await
            .context("update user by subject")?;
        Ok(rows.into_iter().next().map(user_from_model))
    }

    async fn attach_subject(
        &self,
        id: Uuid,
        subject: &str,
        changes: &ProfileChanges,
    ) -> Result<Option<User>, PortalError> {
        let rows = attach_subject_stmt(id, subject, changes)
            .exec_with_returning(&self.db)
            .await
            .context("attach subject to user")?;
        Ok(rows.into_iter().next().map(user_from_model))
    }

    async fn create_or_get(&self, user: &User) -> Result<User, PortalError> {
        let subject = user
            .firebase_uid
            .as_deref()
            .context("new user has no subject")?;
        insert_if_absent_stmt(user)
            .exec_without_returning(&self.db)
            .await
            .context("insert user")?;
        let created = self
            .find_by_subject(subject)
            .await?
            .context("no user linked to subject after insert")?;
        Ok(created)
    }

    async fn upsert(&self, user: &User, changes: &ProfileChanges) -> Result<User, PortalError> {
        let model = upsert_stmt(user, changes)
            .exec_with_returning(&self.db)
            .await
            .context("upsert user")?;
        Ok(user_from_model(model))
    }
}

/// `UPDATE users SET … WHERE firebase_uid = $subject`
fn update_by_subject_stmt(subject: &str, changes: &ProfileChanges) -> UpdateMany<users::Entity> {
    let update = users::Entity::update_many()
        .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(users::Column::FirebaseUid.eq(subject));
    apply_changes(update, changes)
}

/// `UPDATE users SET firebase_uid = $subject, … WHERE id = $id AND firebase_uid IS NULL`
fn attach_subject_stmt(
    id: Uuid,
    subject: &str,
    changes: &ProfileChanges,
) -> UpdateMany<users::Entity> {
    let update = users::Entity::update_many()
        .col_expr(users::Column::FirebaseUid, Expr::value(subject.to_owned()))
        .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(users::Column::Id.eq(id))
        .filter(users::Column::FirebaseUid.is_null());
    apply_changes(update, changes)
}

/// `INSERT … ON CONFLICT (firebase_uid) DO NOTHING`
fn insert_if_absent_stmt(user: &User) -> Insert<users::ActiveModel> {
    users::Entity::insert(active_model(user)).on_conflict(
        OnConflict::column(users::Column::FirebaseUid)
            .do_nothing()
            .to_owned(),
    )
}

/// `INSERT … ON CONFLICT (firebase_uid) DO UPDATE` of `updated_at` and the
/// fields present in `changes`.
fn upsert_stmt(user: &User, changes: &ProfileChanges) -> Insert<users::ActiveModel> {
    let mut columns = vec![users::Column::UpdatedAt];
    if changes.email.is_some() {
        columns.push(users::Column::Email);
    }
    if changes.username.is_some() {
        columns.push(users::Column::Username);
    }
    if changes.phone.is_some() {
        columns.push(users::Column::Phone);
    }
    // EXCLUDED carries `user`'s values, so they must agree with `changes`.
    let mut row = active_model(user);
    if let Some(email) = &changes.email {
        row.email = Set(email.clone());
    }
    if let Some(username) = &changes.username {
        row.username = Set(username.clone());
    }
    if let Some(phone) = &changes.phone {
        row.phone = Set(Some(phone.clone()));
    }
    users::Entity::insert(row).on_conflict(
        OnConflict::column(users::Column::FirebaseUid)
            .update_columns(columns)
            .to_owned(),
    )
}

fn apply_changes(
    mut update: UpdateMany<users::Entity>,
    changes: &ProfileChanges,
) -> UpdateMany<users::Entity> {
    if let Some(email) = &changes.email {
        update = update.col_expr(users::Column::Email, Expr::value(email.clone()));
    }
    if let Some(username) = &changes.username {
        update = update.col_expr(users::Column::Username, Expr::value(username.clone()));
    }
    if let Some(phone) = &changes.phone {
        update = update.col_expr(users::Column::Phone, Expr::value(phone.clone()));
    }
    update
}

fn active_model(user: &User) -> users::ActiveModel {
    users::ActiveModel {
        id: Set(user.id),
        firebase_uid: Set(user.firebase_uid.clone()),
        username: Set(user.username.clone()),
        email: Set(user.email.clone()),
        phone: Set(user.phone.clone()),
        is_service_center: Set(flag_to_db(user.is_service_center)),
        is_activated: Set(flag_to_db(user.is_activated)),
        created_at: Set(user.created_at),
        updated_at: Set(user.updated_at),
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        firebase_uid: model.firebase_uid,
        username: model.username,
        email: model.email,
        phone: model.phone,
        is_service_center: flag_from_db(model.is_service_center),
        is_activated: flag_from_db(model.is_activated),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

/// Legacy SMALLINT flag: any non-zero value is set.
fn flag_from_db(value: i16) -> bool {
    value != 0
}

fn flag_to_db(flag: bool) -> i16 {
    i16::from(flag)
}

// ── Catalog repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCatalogRepository {
    pub db: DatabaseConnection,
}

impl DbCatalogRepository {
    async fn area(&self, id: Uuid) -> Result<Option<Area>, PortalError> {
        let model = areas::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find area")?;
        Ok(model.map(area_from_model))
    }

    /// Product with its area, for detail views one level below the product.
    async fn product_with_area(&self, id: Uuid) -> Result<Option<Product>, PortalError> {
        let row = products::Entity::find_by_id(id)
            .find_also_related(areas::Entity)
            .one(&self.db)
            .await
            .context("find product with area")?;
        Ok(row.map(|(product, area)| product_from_model(product, area)))
    }
}

impl CatalogRepository for DbCatalogRepository {
    async fn list_areas(&self) -> Result<Vec<Area>, PortalError> {
        let models = areas::Entity::find()
            .order_by_asc(areas::Column::Name)
            .all(&self.db)
            .await
            .context("list areas")?;
        Ok(models.into_iter().map(area_from_model).collect())
    }

    async fn list_products(&self, area_id: Uuid) -> Result<Vec<Product>, PortalError> {
        let rows = products::Entity::find()
            .filter(products::Column::AreaId.eq(area_id))
            .order_by_asc(products::Column::Name)
            .find_also_related(areas::Entity)
            .all(&self.db)
            .await
            .context("list products of area")?;
        Ok(rows
            .into_iter()
            .map(|(product, area)| product_from_model(product, area))
            .collect())
    }

    async fn find_product(&self, id: Uuid) -> Result<Option<Product>, PortalError> {
        self.product_with_area(id).await
    }

    async fn list_training_topics(
        &self,
        product_id: Uuid,
    ) -> Result<Vec<TrainingTopic>, PortalError> {
        let models = training_topics::Entity::find()
            .filter(training_topics::Column::ProductId.eq(product_id))
            .order_by_asc(training_topics::Column::Topic)
            .all(&self.db)
            .await
            .context("list training topics of product")?;
        Ok(models
            .into_iter()
            .map(|m| training_topic_from_model(m, None))
            .collect())
    }

    async fn find_training_topic(&self, id: Uuid) -> Result<Option<TrainingTopic>, PortalError> {
        let Some(model) = training_topics::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find training topic")?
        else {
            return Ok(None);
        };
        let product = self.product_with_area(model.product_id).await?;
        Ok(Some(training_topic_from_model(model, product)))
    }

    async fn list_faqs(&self, product_id: Uuid) -> Result<Vec<Faq>, PortalError> {
        let models = faqs::Entity::find()
            .filter(faqs::Column::ProductId.eq(product_id))
            .order_by_asc(faqs::Column::Question)
            .all(&self.db)
            .await
            .context("list faqs of product")?;
        Ok(models.into_iter().map(|m| faq_from_model(m, None)).collect())
    }

    async fn find_faq(&self, id: Uuid) -> Result<Option<Faq>, PortalError> {
        let Some(model) = faqs::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find faq")?
        else {
            return Ok(None);
        };
        let product = self.product_with_area(model.product_id).await?;
        Ok(Some(faq_from_model(model, product)))
    }
}

fn area_from_model(model: areas::Model) -> Area {
    Area {
        id: model.id,
        name: model.name,
        description: model.description,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn product_from_model(model: products::Model, area: Option<areas::Model>) -> Product {
    Product {
        id: model.id,
        area_id: model.area_id,
        name: model.name,
        description: model.description,
        has_video: model.has_video,
        has_pdf: model.has_pdf,
        video_url: model.video_url,
        pdf_url: model.pdf_url,
        created_at: model.created_at,
        updated_at: model.updated_at,
        area: area.map(area_from_model),
    }
}

fn training_topic_from_model(
    model: training_topics::Model,
    product: Option<Product>,
) -> TrainingTopic {
    TrainingTopic {
        id: model.id,
        product_id: model.product_id,
        topic: model.topic,
        info: model.info,
        content: model.content,
        created_at: model.created_at,
        updated_at: model.updated_at,
        product,
    }
}

fn faq_from_model(model: faqs::Model, product: Option<Product>) -> Faq {
    Faq {
        id: model.id,
        product_id: model.product_id,
        question: model.question,
        answer: model.answer,
        created_at: model.created_at,
        updated_at: model.updated_at,
        product,
    }
}

// ── Chat repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbChatRepository {
    pub db: DatabaseConnection,
}

impl ChatRepository for DbChatRepository {
    async fn create_topic(
        &self,
        topic: &ChatTopic,
        first_message: &ChatMessage,
    ) -> Result<(), PortalError> {
        let topic = topic_active_model(topic);
        let message = message_active_model(first_message);
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    topic.insert(txn).await?;
                    message.insert(txn).await?;
                    Ok(())
                })
            })
            .await
            .context("create chat topic")?;
        Ok(())
    }

    async fn list_topics(
        &self,
        user_id: Uuid,
        product_id: Uuid,
    ) -> Result<Vec<ChatTopic>, PortalError> {
        let models = chat_topics::Entity::find()
            .filter(chat_topics::Column::UserId.eq(user_id))
            .filter(chat_topics::Column::ProductId.eq(product_id))
            .order_by_desc(chat_topics::Column::UpdatedAt)
            .all(&self.db)
            .await
            .context("list chat topics")?;
        Ok(models.into_iter().map(topic_from_model).collect())
    }

    async fn find_topic(&self, id: Uuid) -> Result<Option<ChatTopic>, PortalError> {
        let model = chat_topics::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find chat topic")?;
        Ok(model.map(topic_from_model))
    }

    async fn list_messages(&self, topic_id: Uuid) -> Result<Vec<ChatMessage>, PortalError> {
        let models = chat_messages::Entity::find()
            .filter(chat_messages::Column::ChatTopicId.eq(topic_id))
            .order_by_asc(chat_messages::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list chat messages")?;
        Ok(models.into_iter().map(message_from_model).collect())
    }

    async fn add_message(&self, message: &ChatMessage) -> Result<(), PortalError> {
        let topic_id = message.chat_topic_id;
        let bumped_at = message.created_at;
        let message = message_active_model(message);
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    message.insert(txn).await?;
                    chat_topics::Entity::update_many()
                        .col_expr(chat_topics::Column::UpdatedAt, Expr::value(bumped_at))
                        .filter(chat_topics::Column::Id.eq(topic_id))
                        .exec(txn)
                        .await?;
                    Ok(())
                })
            })
            .await
            .context("add chat message")?;
        Ok(())
    }
}

fn topic_active_model(topic: &ChatTopic) -> chat_topics::ActiveModel {
    chat_topics::ActiveModel {
        id: Set(topic.id),
        user_id: Set(topic.user_id),
        product_id: Set(topic.product_id),
        title: Set(topic.title.clone()),
        status: Set(topic.status.as_str().to_owned()),
        created_at: Set(topic.created_at),
        updated_at: Set(topic.updated_at),
    }
}

fn topic_from_model(model: chat_topics::Model) -> ChatTopic {
    ChatTopic {
        id: model.id,
        user_id: model.user_id,
        product_id: model.product_id,
        title: model.title,
        status: ChatStatus::from_db(&model.status),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn message_active_model(message: &ChatMessage) -> chat_messages::ActiveModel {
    chat_messages::ActiveModel {
        id: Set(message.id),
        chat_topic_id: Set(message.chat_topic_id),
        sender_type: Set(message.sender_type.as_str().to_owned()),
        sender_id: Set(message.sender_id),
        message: Set(message.message.clone()),
        created_at: Set(message.created_at),
    }
}

fn message_from_model(model: chat_messages::Model) -> ChatMessage {
    ChatMessage {
        id: model.id,
        chat_topic_id: model.chat_topic_id,
        sender_type: SenderType::from_db(&model.sender_type),
        sender_id: model.sender_id,
        message: model.message,
        created_at: model.created_at,
    }
}
