use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use megalabs_identity::bearer::BearerToken;

use crate::domain::types::{ChatMessage, ChatTopic};
use crate::error::PortalError;
use crate::handlers::{JsonBody, authenticate};
use crate::infra::db::{DbCatalogRepository, DbChatRepository, DbUserRepository};
use crate::state::AppState;
use crate::usecase::chat::ChatUseCase;

#[derive(Serialize)]
pub struct ChatTopicResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub title: String,
    pub status: &'static str,
    #[serde(serialize_with = "megalabs_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "megalabs_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<ChatTopic> for ChatTopicResponse {
    fn from(topic: ChatTopic) -> Self {
        Self {
            id: topic.id,
            user_id: topic.user_id,
            product_id: topic.product_id,
            title: topic.title,
            status: topic.status.as_str(),
            created_at: topic.created_at,
            updated_at: topic.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct ChatMessageResponse {
    pub id: Uuid,
    pub chat_topic_id: Uuid,
    pub sender_type: &'static str,
    pub sender_id: Uuid,
    pub message: String,
    #[serde(serialize_with = "megalabs_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<ChatMessage> for ChatMessageResponse {
    fn from(message: ChatMessage) -> Self {
        Self {
            id: message.id,
            chat_topic_id: message.chat_topic_id,
            sender_type: message.sender_type.as_str(),
            sender_id: message.sender_id,
            message: message.message,
            created_at: message.created_at,
        }
    }
}

#[derive(Deserialize)]
pub struct MessageRequest {
    pub message: String,
}

fn chat(state: &AppState) -> ChatUseCase<DbUserRepository, DbCatalogRepository, DbChatRepository> {
    ChatUseCase {
        users: state.user_repo(),
        catalog: state.catalog_repo(),
        chats: state.chat_repo(),
    }
}

// ── GET /products/{product_id}/chat-topics ───────────────────────────────────

pub async fn list_chat_topics(
    token: BearerToken,
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> Result<Json<Vec<ChatTopicResponse>>, PortalError> {
    let claims = authenticate(&state, &token).await?;
    let topics = chat(&state).topics(&claims.subject, product_id).await?;
    Ok(Json(topics.into_iter().map(Into::into).collect()))
}

// ── POST /products/{product_id}/chat-topics ──────────────────────────────────

pub async fn open_chat_topic(
    token: BearerToken,
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    JsonBody(body): JsonBody<MessageRequest>,
) -> Result<(StatusCode, Json<ChatTopicResponse>), PortalError> {
    let claims = authenticate(&state, &token).await?;
    let topic = chat(&state)
        .open_topic(&claims.subject, product_id, &body.message)
        .await?;
    Ok((StatusCode::CREATED, Json(topic.into())))
}

// ── GET /chat-topics/{topic_id}/messages ─────────────────────────────────────

pub async fn list_chat_messages(
    token: BearerToken,
    State(state): State<AppState>,
    Path(topic_id): Path<Uuid>,
) -> Result<Json<Vec<ChatMessageResponse>>, PortalError> {
    let claims = authenticate(&state, &token).await?;
    let messages = chat(&state).messages(&claims.subject, topic_id).await?;
    Ok(Json(messages.into_iter().map(Into::into).collect()))
}

// ── POST /chat-topics/{topic_id}/messages ────────────────────────────────────

pub async fn post_chat_message(
    token: BearerToken,
    State(state): State<AppState>,
    Path(topic_id): Path<Uuid>,
    JsonBody(body): JsonBody<MessageRequest>,
) -> Result<(StatusCode, Json<ChatMessageResponse>), PortalError> {
    let claims = authenticate(&state, &token).await?;
    let message = chat(&state)
        .post_message(&claims.subject, topic_id, &body.message)
        .await?;
    Ok((StatusCode::CREATED, Json(message.into())))
}
