use uuid::Uuid;

use crate::domain::repository::CatalogRepository;
use crate::domain::types::{Area, Faq, Product, TrainingTopic};
use crate::error::PortalError;

/// Read access to areas, products, training topics and FAQs.
pub struct CatalogUseCase<R: CatalogRepository> {
    pub repo: R,
}

impl<R: CatalogRepository> CatalogUseCase<R> {
    pub async fn areas(&self) -> Result<Vec<Area>, PortalError> {
        self.repo.list_areas().await
    }

    /// An unknown area simply has no products.
    pub async fn products(&self, area_id: Uuid) -> Result<Vec<Product>, PortalError> {
        self.repo.list_products(area_id).await
    }

    pub async fn product(&self, id: Uuid) -> Result<Product, PortalError> {
        self.repo
            .find_product(id)
            .await?
            .ok_or(PortalError::ProductNotFound)
    }

    pub async fn training_topics(&self, product_id: Uuid) -> Result<Vec<TrainingTopic>, PortalError> {
        self.repo.list_training_topics(product_id).await
    }

    pub async fn training_topic(&self, id: Uuid) -> Result<TrainingTopic, PortalError> {
        self.repo
            .find_training_topic(id)
            .await?
            .ok_or(PortalError::TrainingTopicNotFound)
    }

    pub async fn faqs(&self, product_id: Uuid) -> Result<Vec<Faq>, PortalError> {
        self.repo.list_faqs(product_id).await
    }

    pub async fn faq(&self, id: Uuid) -> Result<Faq, PortalError> {
        self.repo
            .find_faq(id)
            .await?
            .ok_or(PortalError::FaqNotFound)
    }
}
