use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::types::{Area, Faq, Product, TrainingTopic};
use crate::error::PortalError;
use crate::infra::db::DbCatalogRepository;
use crate::state::AppState;
use crate::usecase::catalog::CatalogUseCase;

#[derive(Serialize)]
pub struct AreaResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[serde(serialize_with = "megalabs_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "megalabs_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Area> for AreaResponse {
    fn from(area: Area) -> Self {
        Self {
            id: area.id,
            name: area.name,
            description: area.description,
            created_at: area.created_at,
            updated_at: area.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct ProductResponse {
    pub id: Uuid,
    pub area_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub has_video: bool,
    pub has_pdf: bool,
    pub video_url: Option<String>,
    pub pdf_url: Option<String>,
    #[serde(serialize_with = "megalabs_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "megalabs_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<AreaResponse>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            area_id: product.area_id,
            name: product.name,
            description: product.description,
            has_video: product.has_video,
            has_pdf: product.has_pdf,
            video_url: product.video_url,
            pdf_url: product.pdf_url,
            created_at: product.created_at,
            updated_at: product.updated_at,
            area: product.area.map(Into::into),
        }
    }
}

#[derive(Serialize)]
pub struct TrainingTopicResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub topic: String,
    pub info: Option<String>,
    pub content: Option<String>,
    #[serde(serialize_with = "megalabs_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "megalabs_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductResponse>,
}

impl From<TrainingTopic> for TrainingTopicResponse {
    fn from(topic: TrainingTopic) -> Self {
        Self {
            id: topic.id,
            product_id: topic.product_id,
            topic: topic.topic,
            info: topic.info,
            content: topic.content,
            created_at: topic.created_at,
            updated_at: topic.updated_at,
            product: topic.product.map(Into::into),
        }
    }
}

#[derive(Serialize)]
pub struct FaqResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub question: String,
    pub answer: String,
    #[serde(serialize_with = "megalabs_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "megalabs_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductResponse>,
}

impl From<Faq> for FaqResponse {
    fn from(faq: Faq) -> Self {
        Self {
            id: faq.id,
            product_id: faq.product_id,
            question: faq.question,
            answer: faq.answer,
            created_at: faq.created_at,
            updated_at: faq.updated_at,
            product: faq.product.map(Into::into),
        }
    }
}

fn catalog(state: &AppState) -> CatalogUseCase<DbCatalogRepository> {
    CatalogUseCase {
        repo: state.catalog_repo(),
    }
}

fn into_responses<T, R: From<T>>(items: Vec<T>) -> Json<Vec<R>> {
    Json(items.into_iter().map(R::from).collect())
}

// ── GET /areas ───────────────────────────────────────────────────────────────

pub async fn list_areas(
    State(state): State<AppState>,
) -> Result<Json<Vec<AreaResponse>>, PortalError> {
    Ok(into_responses(catalog(&state).areas().await?))
}

// ── GET /areas/{area_id}/products ────────────────────────────────────────────

pub async fn list_products(
    State(state): State<AppState>,
    Path(area_id): Path<Uuid>,
) -> Result<Json<Vec<ProductResponse>>, PortalError> {
    Ok(into_responses(catalog(&state).products(area_id).await?))
}

// ── GET /products/{product_id} ───────────────────────────────────────────────

pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> Result<Json<ProductResponse>, PortalError> {
    let product = catalog(&state).product(product_id).await?;
    Ok(Json(product.into()))
}

// ── GET /products/{product_id}/training-topics ───────────────────────────────

pub async fn list_training_topics(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> Result<Json<Vec<TrainingTopicResponse>>, PortalError> {
    Ok(into_responses(
        catalog(&state).training_topics(product_id).await?,
    ))
}

// ── GET /training-topics/{topic_id} ──────────────────────────────────────────

pub async fn get_training_topic(
    State(state): State<AppState>,
    Path(topic_id): Path<Uuid>,
) -> Result<Json<TrainingTopicResponse>, PortalError> {
    let topic = catalog(&state).training_topic(topic_id).await?;
    Ok(Json(topic.into()))
}

// ── GET /products/{product_id}/faqs ──────────────────────────────────────────

pub async fn list_faqs(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> Result<Json<Vec<FaqResponse>>, PortalError> {
    Ok(into_responses(catalog(&state).faqs(product_id).await?))
}

// ── GET /faqs/{faq_id} ───────────────────────────────────────────────────────

pub async fn get_faq(
    State(state): State<AppState>,
    Path(faq_id): Path<Uuid>,
) -> Result<Json<FaqResponse>, PortalError> {
    let faq = catalog(&state).faq(faq_id).await?;
    Ok(Json(faq.into()))
}
