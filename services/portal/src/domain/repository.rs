#![allow(async_fn_in_trait)]

use uuid::Uuid;

use crate::domain::types::{
    Area, ChatMessage, ChatTopic, Faq, Product, ProfileChanges, TrainingTopic, User,
};
use crate::error::PortalError;

/// Repository for portal accounts.
///
/// Writes are single statements so that concurrent sign-ins of the same
/// subject converge on one row.
pub trait UserRepository: Send + Sync {
    async fn find_by_subject(&self, subject: &str) -> Result<Option<User>, PortalError>;

    /// Oldest row with `email`, linked or not.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, PortalError>;

    /// Oldest row with `email` that has no subject yet.
    async fn find_unlinked_by_email(&self, email: &str) -> Result<Option<User>, PortalError>;

    /// Apply `changes` to the row linked to `subject`. `None` if no row is linked.
    async fn update_by_subject(
        &self,
        subject: &str,
        changes: &ProfileChanges,
    ) -> Result<Option<User>, PortalError>;

    /// Link `subject` to row `id` and apply `changes`, only while the row is
    /// still unlinked. `None` when another caller linked it first.
    async fn attach_subject(
        &self,
        id: Uuid,
        subject: &str,
        changes: &ProfileChanges,
    ) -> Result<Option<User>, PortalError>;

    /// Insert `user` unless its subject is already linked, then return the
    /// row linked to that subject.
    async fn create_or_get(&self, user: &User) -> Result<User, PortalError>;

    /// Insert `user`; if its subject is already linked, apply `changes` to
    /// that row instead.
    async fn upsert(&self, user: &User, changes: &ProfileChanges) -> Result<User, PortalError>;
}

/// Read-only access to the content catalog.
pub trait CatalogRepository: Send + Sync {
    /// All areas, ordered by name.
    async fn list_areas(&self) -> Result<Vec<Area>, PortalError>;

    /// Products of an area ordered by name, each with its area loaded.
    async fn list_products(&self, area_id: Uuid) -> Result<Vec<Product>, PortalError>;

    async fn find_product(&self, id: Uuid) -> Result<Option<Product>, PortalError>;

    /// Training topics of a product, ordered by topic.
    async fn list_training_topics(
        &self,
        product_id: Uuid,
    ) -> Result<Vec<TrainingTopic>, PortalError>;

    /// Training topic with its product and the product's area.
    async fn find_training_topic(&self, id: Uuid) -> Result<Option<TrainingTopic>, PortalError>;

    /// FAQs of a product, ordered by question.
    async fn list_faqs(&self, product_id: Uuid) -> Result<Vec<Faq>, PortalError>;

    async fn find_faq(&self, id: Uuid) -> Result<Option<Faq>, PortalError>;
}

/// Repository for support chat topics and their messages.
pub trait ChatRepository: Send + Sync {
    /// Insert a topic and its opening message in one transaction.
    async fn create_topic(
        &self,
        topic: &ChatTopic,
        first_message: &ChatMessage,
    ) -> Result<(), PortalError>;

    /// Topics a user opened about a product, most recently updated first.
    async fn list_topics(
        &self,
        user_id: Uuid,
        product_id: Uuid,
    ) -> Result<Vec<ChatTopic>, PortalError>;

    async fn find_topic(&self, id: Uuid) -> Result<Option<ChatTopic>, PortalError>;

    /// Messages of a topic, oldest first.
    async fn list_messages(&self, topic_id: Uuid) -> Result<Vec<ChatMessage>, PortalError>;

    /// Insert a message and bump its topic's `updated_at` in one transaction.
    async fn add_message(&self, message: &ChatMessage) -> Result<(), PortalError>;
}
