pub mod areas;
pub mod chat_messages;
pub mod chat_topics;
pub mod faqs;
pub mod products;
pub mod training_topics;
pub mod users;
