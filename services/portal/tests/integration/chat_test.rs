use chrono::Utc;
use uuid::Uuid;

use megalabs_portal::domain::types::{ChatMessage, ChatStatus, SenderType};
use megalabs_portal::error::PortalError;
use megalabs_portal::usecase::chat::ChatUseCase;

use crate::helpers::{
    MockCatalogRepo, MockChatRepo, MockUserRepo, at, linked_user, test_area, test_product,
    test_topic,
};

struct Fixture {
    usecase: ChatUseCase<MockUserRepo, MockCatalogRepo, MockChatRepo>,
    chats: MockChatRepo,
    owner_id: Uuid,
    other_id: Uuid,
    product_id: Uuid,
}

fn fixture(chats: MockChatRepo) -> Fixture {
    let owner = linked_user("abc-1", "ana@megalabs.com");
    let other = linked_user("xyz-9", "luis@megalabs.com");
    let area = test_area("Diagnostics");
    let product = test_product(&area, "Analyzer X");
    Fixture {
        owner_id: owner.id,
        other_id: other.id,
        product_id: product.id,
        usecase: ChatUseCase {
            users: MockUserRepo::new(vec![owner, other]),
            catalog: MockCatalogRepo {
                areas: vec![area],
                products: vec![product],
                ..Default::default()
            },
            chats: chats.clone(),
        },
        chats,
    }
}

fn message(topic_id: Uuid, sender_id: Uuid, text: &str, minute: i64) -> ChatMessage {
    ChatMessage {
        id: Uuid::now_v7(),
        chat_topic_id: topic_id,
        sender_type: SenderType::Client,
        sender_id,
        message: text.into(),
        created_at: at(minute),
    }
}

// ── open_topic ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_open_topic_with_first_message() {
    let f = fixture(MockChatRepo::default());

    let topic = f
        .usecase
        .open_topic("abc-1", f.product_id, "  How do I calibrate the analyzer?  ")
        .await
        .unwrap();

    assert_eq!(topic.user_id, f.owner_id);
    assert_eq!(topic.title, "How do I calibrate the analyzer?");
    assert_eq!(topic.status, ChatStatus::Open);

    let messages = f.chats.messages.lock().unwrap().clone();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].chat_topic_id, topic.id);
    assert_eq!(messages[0].sender_type, SenderType::Client);
    assert_eq!(messages[0].sender_id, f.owner_id);
    assert_eq!(messages[0].message, "How do I calibrate the analyzer?");
}

#[tokio::test]
async fn should_truncate_long_topic_titles() {
    let f = fixture(MockChatRepo::default());
    let text = "x".repeat(80);

    let topic = f
        .usecase
        .open_topic("abc-1", f.product_id, &text)
        .await
        .unwrap();

    assert_eq!(topic.title, format!("{}...", "x".repeat(50)));
    assert_eq!(f.chats.messages.lock().unwrap()[0].message, text);
}

#[tokio::test]
async fn should_reject_blank_first_message() {
    let f = fixture(MockChatRepo::default());
    let result = f.usecase.open_topic("abc-1", f.product_id, "   ").await;
    assert!(matches!(result, Err(PortalError::EmptyMessage)));
    assert!(f.chats.topics.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_topic_for_unknown_product() {
    let f = fixture(MockChatRepo::default());
    let result = f.usecase.open_topic("abc-1", Uuid::now_v7(), "hello").await;
    assert!(matches!(result, Err(PortalError::ProductNotFound)));
}

#[tokio::test]
async fn should_reject_unknown_caller() {
    let f = fixture(MockChatRepo::default());
    let result = f.usecase.open_topic("nobody", f.product_id, "hello").await;
    assert!(matches!(result, Err(PortalError::ProfileNotFound)));
}

// ── topics ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_own_topics_most_recent_first() {
    let f = fixture(MockChatRepo::default());
    let older = test_topic(f.owner_id, f.product_id, 5);
    let newer = test_topic(f.owner_id, f.product_id, 30);
    let foreign = test_topic(f.other_id, f.product_id, 60);
    f.chats
        .topics
        .lock()
        .unwrap()
        .extend([older.clone(), newer.clone(), foreign]);

    let topics = f.usecase.topics("abc-1", f.product_id).await.unwrap();

    let ids: Vec<Uuid> = topics.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);
}

// ── messages / post_message ──────────────────────────────────────────────────

#[tokio::test]
async fn should_list_messages_oldest_first() {
    let f = fixture(MockChatRepo::default());
    let topic = test_topic(f.owner_id, f.product_id, 0);
    let second = message(topic.id, f.owner_id, "second", 10);
    let first = message(topic.id, f.owner_id, "first", 1);
    f.chats.topics.lock().unwrap().push(topic.clone());
    f.chats
        .messages
        .lock()
        .unwrap()
        .extend([second, first]);

    let messages = f.usecase.messages("abc-1", topic.id).await.unwrap();

    let texts: Vec<&str> = messages.iter().map(|m| m.message.as_str()).collect();
    assert_eq!(texts, vec!["first", "second"]);
}

#[tokio::test]
async fn should_forbid_reading_other_users_topic() {
    let f = fixture(MockChatRepo::default());
    let topic = test_topic(f.other_id, f.product_id, 0);
    f.chats.topics.lock().unwrap().push(topic.clone());

    let result = f.usecase.messages("abc-1", topic.id).await;
    assert!(matches!(result, Err(PortalError::Forbidden)));
}

#[tokio::test]
async fn should_forbid_posting_to_other_users_topic() {
    let f = fixture(MockChatRepo::default());
    let topic = test_topic(f.other_id, f.product_id, 0);
    f.chats.topics.lock().unwrap().push(topic.clone());

    let result = f.usecase.post_message("abc-1", topic.id, "hi").await;

    assert!(matches!(result, Err(PortalError::Forbidden)));
    assert!(f.chats.messages.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_return_not_found_for_unknown_topic() {
    let f = fixture(MockChatRepo::default());
    let result = f.usecase.post_message("abc-1", Uuid::now_v7(), "hi").await;
    assert!(matches!(result, Err(PortalError::ChatTopicNotFound)));
}

#[tokio::test]
async fn should_post_message_and_bump_topic() {
    let f = fixture(MockChatRepo::default());
    let topic = test_topic(f.owner_id, f.product_id, 0);
    f.chats.topics.lock().unwrap().push(topic.clone());
    let before = Utc::now();

    let posted = f
        .usecase
        .post_message("abc-1", topic.id, "Any update?")
        .await
        .unwrap();

    assert_eq!(posted.chat_topic_id, topic.id);
    assert_eq!(posted.sender_id, f.owner_id);
    assert_eq!(posted.sender_type, SenderType::Client);
    let bumped = f.chats.topics.lock().unwrap()[0].updated_at;
    assert!(bumped >= before);
    assert_eq!(bumped, posted.created_at);
}

#[tokio::test]
async fn should_reject_blank_reply() {
    let f = fixture(MockChatRepo::default());
    let topic = test_topic(f.owner_id, f.product_id, 0);
    f.chats.topics.lock().unwrap().push(topic.clone());

    let result = f.usecase.post_message("abc-1", topic.id, "\n\t").await;
    assert!(matches!(result, Err(PortalError::EmptyMessage)));
}
