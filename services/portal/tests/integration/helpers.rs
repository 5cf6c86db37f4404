use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use megalabs_identity::claims::{IdentityClaims, decode_unverified};
use megalabs_portal::domain::repository::{CatalogRepository, ChatRepository, UserRepository};
use megalabs_portal::domain::types::{
    Area, ChatMessage, ChatStatus, ChatTopic, Faq, Product, ProfileChanges, TrainingTopic, User,
};
use megalabs_portal::error::PortalError;
use megalabs_testing::auth::MockIdToken;

// ── MockUserRepo ─────────────────────────────────────────────────────────────

/// In-memory user table with the same single-row write semantics as the
/// database adapter. Counts every write attempt.
#[derive(Clone, Default)]
pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
    pub writes: Arc<Mutex<usize>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
            writes: Arc::new(Mutex::new(0)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn rows(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }

    pub fn write_count(&self) -> usize {
        *self.writes.lock().unwrap()
    }

    fn record_write(&self) {
        *self.writes.lock().unwrap() += 1;
    }
}

fn apply(user: &mut User, changes: &ProfileChanges) {
    if let Some(email) = &changes.email {
        user.email = email.clone();
    }
    if let Some(username) = &changes.username {
        user.username = username.clone();
    }
    if let Some(phone) = &changes.phone {
        user.phone = Some(phone.clone());
    }
    user.updated_at = Utc::now();
}

impl UserRepository for MockUserRepo {
    async fn find_by_subject(&self, subject: &str) -> Result<Option<User>, PortalError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.firebase_uid.as_deref() == Some(subject))
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, PortalError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.email == email)
            .min_by_key(|u| u.created_at)
            .cloned())
    }

    async fn find_unlinked_by_email(&self, email: &str) -> Result<Option<User>, PortalError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.email == email && u.firebase_uid.is_none())
            .min_by_key(|u| u.created_at)
            .cloned())
    }

    async fn update_by_subject(
        &self,
        subject: &str,
        changes: &ProfileChanges,
    ) -> Result<Option<User>, PortalError> {
        self.record_write();
        let mut users = self.users.lock().unwrap();
        Ok(users
            .iter_mut()
            .find(|u| u.firebase_uid.as_deref() == Some(subject))
            .map(|u| {
                apply(u, changes);
                u.clone()
            }))
    }

    async fn attach_subject(
        &self,
        id: Uuid,
        subject: &str,
        changes: &ProfileChanges,
    ) -> Result<Option<User>, PortalError> {
        self.record_write();
        let mut users = self.users.lock().unwrap();
        Ok(users
            .iter_mut()
            .find(|u| u.id == id && u.firebase_uid.is_none())
            .map(|u| {
                u.firebase_uid = Some(subject.to_owned());
                apply(u, changes);
                u.clone()
            }))
    }

    async fn create_or_get(&self, user: &User) -> Result<User, PortalError> {
        self.record_write();
        let mut users = self.users.lock().unwrap();
        if let Some(existing) = users.iter().find(|u| u.firebase_uid == user.firebase_uid) {
            return Ok(existing.clone());
        }
        users.push(user.clone());
        Ok(user.clone())
    }

    async fn upsert(&self, user: &User, changes: &ProfileChanges) -> Result<User, PortalError> {
        self.record_write();
        let mut users = self.users.lock().unwrap();
        if let Some(existing) = users
            .iter_mut()
            .find(|u| u.firebase_uid == user.firebase_uid)
        {
            apply(existing, changes);
            return Ok(existing.clone());
        }
        users.push(user.clone());
        Ok(user.clone())
    }
}

// ── MockCatalogRepo ──────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockCatalogRepo {
    pub areas: Vec<Area>,
    pub products: Vec<Product>,
    pub training_topics: Vec<TrainingTopic>,
    pub faqs: Vec<Faq>,
}

impl CatalogRepository for MockCatalogRepo {
    async fn list_areas(&self) -> Result<Vec<Area>, PortalError> {
        let mut areas = self.areas.clone();
        areas.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(areas)
    }

    async fn list_products(&self, area_id: Uuid) -> Result<Vec<Product>, PortalError> {
        let mut products: Vec<Product> = self
            .products
            .iter()
            .filter(|p| p.area_id == area_id)
            .cloned()
            .collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }

    async fn find_product(&self, id: Uuid) -> Result<Option<Product>, PortalError> {
        Ok(self.products.iter().find(|p| p.id == id).cloned())
    }

    async fn list_training_topics(
        &self,
        product_id: Uuid,
    ) -> Result<Vec<TrainingTopic>, PortalError> {
        Ok(self
            .training_topics
            .iter()
            .filter(|t| t.product_id == product_id)
            .cloned()
            .collect())
    }

    async fn find_training_topic(&self, id: Uuid) -> Result<Option<TrainingTopic>, PortalError> {
        Ok(self.training_topics.iter().find(|t| t.id == id).cloned())
    }

    async fn list_faqs(&self, product_id: Uuid) -> Result<Vec<Faq>, PortalError> {
        Ok(self
            .faqs
            .iter()
            .filter(|f| f.product_id == product_id)
            .cloned()
            .collect())
    }

    async fn find_faq(&self, id: Uuid) -> Result<Option<Faq>, PortalError> {
        Ok(self.faqs.iter().find(|f| f.id == id).cloned())
    }
}

// ── MockChatRepo ─────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockChatRepo {
    pub topics: Arc<Mutex<Vec<ChatTopic>>>,
    pub messages: Arc<Mutex<Vec<ChatMessage>>>,
}

impl MockChatRepo {
    pub fn new(topics: Vec<ChatTopic>, messages: Vec<ChatMessage>) -> Self {
        Self {
            topics: Arc::new(Mutex::new(topics)),
            messages: Arc::new(Mutex::new(messages)),
        }
    }
}

impl ChatRepository for MockChatRepo {
    async fn create_topic(
        &self,
        topic: &ChatTopic,
        first_message: &ChatMessage,
    ) -> Result<(), PortalError> {
        self.topics.lock().unwrap().push(topic.clone());
        self.messages.lock().unwrap().push(first_message.clone());
        Ok(())
    }

    async fn list_topics(
        &self,
        user_id: Uuid,
        product_id: Uuid,
    ) -> Result<Vec<ChatTopic>, PortalError> {
        let mut topics: Vec<ChatTopic> = self
            .topics
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.user_id == user_id && t.product_id == product_id)
            .cloned()
            .collect();
        topics.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(topics)
    }

    async fn find_topic(&self, id: Uuid) -> Result<Option<ChatTopic>, PortalError> {
        Ok(self
            .topics
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn list_messages(&self, topic_id: Uuid) -> Result<Vec<ChatMessage>, PortalError> {
        let mut messages: Vec<ChatMessage> = self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.chat_topic_id == topic_id)
            .cloned()
            .collect();
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(messages)
    }

    async fn add_message(&self, message: &ChatMessage) -> Result<(), PortalError> {
        if let Some(topic) = self
            .topics
            .lock()
            .unwrap()
            .iter_mut()
            .find(|t| t.id == message.chat_topic_id)
        {
            topic.updated_at = message.created_at;
        }
        self.messages.lock().unwrap().push(message.clone());
        Ok(())
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap() + Duration::minutes(minutes)
}

/// Claims as the unverified decoder produces them from a minted token.
pub fn claims(subject: &str, email: Option<&str>) -> IdentityClaims {
    let mut token = MockIdToken::new(subject);
    if let Some(email) = email {
        token = token.email(email);
    }
    decode_unverified(&token.encode()).unwrap()
}

pub fn linked_user(subject: &str, email: &str) -> User {
    User {
        id: Uuid::now_v7(),
        firebase_uid: Some(subject.to_owned()),
        username: "Linked User".into(),
        email: email.into(),
        phone: Some("+598 99 000 000".into()),
        is_service_center: true,
        is_activated: true,
        created_at: at(0),
        updated_at: at(0),
    }
}

pub fn legacy_user(email: &str) -> User {
    User {
        id: Uuid::now_v7(),
        firebase_uid: None,
        username: "Legacy User".into(),
        email: email.into(),
        phone: None,
        is_service_center: false,
        is_activated: false,
        created_at: at(0),
        updated_at: at(0),
    }
}

pub fn test_area(name: &str) -> Area {
    Area {
        id: Uuid::now_v7(),
        name: name.into(),
        description: None,
        created_at: at(0),
        updated_at: at(0),
    }
}

pub fn test_product(area: &Area, name: &str) -> Product {
    Product {
        id: Uuid::now_v7(),
        area_id: area.id,
        name: name.into(),
        description: Some("Automated analyzer".into()),
        has_video: true,
        has_pdf: false,
        video_url: Some("https://videos.megalabs.test/analyzer".into()),
        pdf_url: None,
        created_at: at(0),
        updated_at: at(0),
        area: Some(area.clone()),
    }
}

pub fn test_topic(user_id: Uuid, product_id: Uuid, updated_minute: i64) -> ChatTopic {
    ChatTopic {
        id: Uuid::now_v7(),
        user_id,
        product_id,
        title: "Calibration question".into(),
        status: ChatStatus::Open,
        created_at: at(0),
        updated_at: at(updated_minute),
    }
}
