use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Portal account as seen by the use cases. Flags are plain `bool` here;
/// the storage encoding is an adapter concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    /// Identity provider subject. `None` for legacy rows not yet linked.
    pub firebase_uid: Option<String>,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub is_service_center: bool,
    pub is_activated: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// A fresh, activated, non-service-center account linked to `subject`.
    pub fn new_linked(
        subject: &str,
        email: String,
        username: String,
        phone: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            firebase_uid: Some(subject.to_owned()),
            username,
            email,
            phone,
            is_service_center: false,
            is_activated: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Editable profile fields. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    pub email: Option<String>,
    pub username: Option<String>,
    pub phone: Option<String>,
}

impl ProfileChanges {
    /// Blank strings count as absent.
    pub fn new(email: Option<String>, username: Option<String>, phone: Option<String>) -> Self {
        Self {
            email: present(email),
            username: present(username),
            phone: present(phone),
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Normalized profile returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub is_service_center: bool,
    pub is_activated: bool,
    pub firebase_uid: Option<String>,
}

impl From<User> for Profile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            phone: user.phone,
            is_service_center: user.is_service_center,
            is_activated: user.is_activated,
            firebase_uid: user.firebase_uid,
        }
    }
}

/// Part of `email` before the `@`, or the whole string if that part is empty.
pub fn email_local_part(email: &str) -> &str {
    match email.split_once('@') {
        Some((local, _)) if !local.is_empty() => local,
        _ => email,
    }
}

// ── Catalog ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Area {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: Uuid,
    pub area_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub has_video: bool,
    pub has_pdf: bool,
    pub video_url: Option<String>,
    pub pdf_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Owning area, when loaded alongside.
    pub area: Option<Area>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingTopic {
    pub id: Uuid,
    pub product_id: Uuid,
    pub topic: String,
    pub info: Option<String>,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub product: Option<Product>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Faq {
    pub id: Uuid,
    pub product_id: Uuid,
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub product: Option<Product>,
}

// ── Chat ─────────────────────────────────────────────────────────────────────

const CHAT_TITLE_MAX_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatStatus {
    Open,
    Closed,
}

impl ChatStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }

    /// Unknown values read as `Open`.
    pub fn from_db(value: &str) -> Self {
        match value {
            "closed" => Self::Closed,
            _ => Self::Open,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SenderType {
    Client,
    Support,
}

impl SenderType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Support => "support",
        }
    }

    pub fn from_db(value: &str) -> Self {
        match value {
            "support" => Self::Support,
            _ => Self::Client,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTopic {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub title: String,
    pub status: ChatStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: Uuid,
    pub chat_topic_id: Uuid,
    pub sender_type: SenderType,
    pub sender_id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Topic title derived from its opening message: the first 50 characters,
/// with `...` appended when the message is longer.
pub fn chat_title(message: &str) -> String {
    let mut chars = message.chars();
    let head: String = chars.by_ref().take(CHAT_TITLE_MAX_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
