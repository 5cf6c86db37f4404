use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{CatalogRepository, ChatRepository, UserRepository};
use crate::domain::types::{ChatMessage, ChatStatus, ChatTopic, SenderType, User, chat_title};
use crate::error::PortalError;

/// Support chat for the signed-in caller. Every operation first resolves the
/// caller's account by subject; chat never creates accounts.
pub struct ChatUseCase<U, C, R>
where
    U: UserRepository,
    C: CatalogRepository,
    R: ChatRepository,
{
    pub users: U,
    pub catalog: C,
    pub chats: R,
}

impl<U, C, R> ChatUseCase<U, C, R>
where
    U: UserRepository,
    C: CatalogRepository,
    R: ChatRepository,
{
    pub async fn open_topic(
        &self,
        subject: &str,
        product_id: Uuid,
        message: &str,
    ) -> Result<ChatTopic, PortalError> {
        let user = self.caller(subject).await?;
        let message = message.trim();
        if message.is_empty() {
            return Err(PortalError::EmptyMessage);
        }
        self.require_product(product_id).await?;

        let now = Utc::now();
        let topic = ChatTopic {
            id: Uuid::now_v7(),
            user_id: user.id,
            product_id,
            title: chat_title(message),
            status: ChatStatus::Open,
            created_at: now,
            updated_at: now,
        };
        let first = ChatMessage {
            id: Uuid::now_v7(),
            chat_topic_id: topic.id,
            sender_type: SenderType::Client,
            sender_id: user.id,
            message: message.to_owned(),
            created_at: now,
        };
        self.chats.create_topic(&topic, &first).await?;
        Ok(topic)
    }

    pub async fn topics(
        &self,
        subject: &str,
        product_id: Uuid,
    ) -> Result<Vec<ChatTopic>, PortalError> {
        let user = self.caller(subject).await?;
        self.require_product(product_id).await?;
        self.chats.list_topics(user.id, product_id).await
    }

    pub async fn messages(
        &self,
        subject: &str,
        topic_id: Uuid,
    ) -> Result<Vec<ChatMessage>, PortalError> {
        let user = self.caller(subject).await?;
        self.owned_topic(&user, topic_id).await?;
        self.chats.list_messages(topic_id).await
    }

    pub async fn post_message(
        &self,
        subject: &str,
        topic_id: Uuid,
        message: &str,
    ) -> Result<ChatMessage, PortalError> {
        let user = self.caller(subject).await?;
        let message = message.trim();
        if message.is_empty() {
            return Err(PortalError::EmptyMessage);
        }
        self.owned_topic(&user, topic_id).await?;

        let msg = ChatMessage {
            id: Uuid::now_v7(),
            chat_topic_id: topic_id,
            sender_type: SenderType::Client,
            sender_id: user.id,
            message: message.to_owned(),
            created_at: Utc::now(),
        };
        self.chats.add_message(&msg).await?;
        Ok(msg)
    }

    async fn caller(&self, subject: &str) -> Result<User, PortalError> {
        self.users
            .find_by_subject(subject)
            .await?
            .ok_or(PortalError::ProfileNotFound)
    }

    async fn require_product(&self, product_id: Uuid) -> Result<(), PortalError> {
        self.catalog
            .find_product(product_id)
            .await?
            .map(|_| ())
            .ok_or(PortalError::ProductNotFound)
    }

    async fn owned_topic(&self, user: &User, topic_id: Uuid) -> Result<ChatTopic, PortalError> {
        let topic = self
            .chats
            .find_topic(topic_id)
            .await?
            .ok_or(PortalError::ChatTopicNotFound)?;
        if topic.user_id != user.id {
            return Err(PortalError::Forbidden);
        }
        Ok(topic)
    }
}
