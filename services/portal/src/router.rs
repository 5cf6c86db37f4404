use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};

use megalabs_core::health::healthz;

use crate::handlers::{
    catalog::{
        get_faq, get_product, get_training_topic, list_areas, list_faqs, list_products,
        list_training_topics,
    },
    chat::{list_chat_messages, list_chat_topics, open_chat_topic, post_chat_message},
    profile::{get_profile, sync_user},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Identity
        .route("/api/auth/profile", get(get_profile))
        .route("/api/auth/sync-user", post(sync_user))
        // Catalog
        .route("/areas", get(list_areas))
        .route("/areas/{area_id}/products", get(list_products))
        .route("/products/{product_id}", get(get_product))
        .route(
            "/products/{product_id}/training-topics",
            get(list_training_topics),
        )
        .route("/training-topics/{topic_id}", get(get_training_topic))
        .route("/products/{product_id}/faqs", get(list_faqs))
        .route("/faqs/{faq_id}", get(get_faq))
        // Chat
        .route(
            "/products/{product_id}/chat-topics",
            get(list_chat_topics).post(open_chat_topic),
        )
        .route(
            "/chat-topics/{topic_id}/messages",
            get(list_chat_messages).post(post_chat_message),
        )
        .with_state(state)
}

/// Handler for `GET /readyz`: ready once the database answers.
async fn readyz(State(state): State<AppState>) -> StatusCode {
    match state.db.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "database ping failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
