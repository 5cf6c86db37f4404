use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use megalabs_identity::error::TokenError;

/// Portal service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    #[error("no authorization token provided")]
    MissingToken,
    #[error("invalid token")]
    InvalidToken,
    #[error("token subject does not match request")]
    SubjectMismatch,
    #[error("forbidden")]
    Forbidden,
    #[error("profile not found")]
    ProfileNotFound,
    #[error("email is linked to another account")]
    EmailLinkedToOtherAccount,
    #[error("product not found")]
    ProductNotFound,
    #[error("training topic not found")]
    TrainingTopicNotFound,
    #[error("faq not found")]
    FaqNotFound,
    #[error("chat topic not found")]
    ChatTopicNotFound,
    #[error("email is required")]
    MissingEmail,
    #[error("message must not be empty")]
    EmptyMessage,
    #[error("invalid request body: {0}")]
    InvalidBody(String),
    #[error("profile recovery failed")]
    ProfileRecoveryFailed(#[source] anyhow::Error),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl PortalError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingToken => "MISSING_TOKEN",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::SubjectMismatch => "TOKEN_MISMATCH",
            Self::Forbidden => "FORBIDDEN",
            Self::ProfileNotFound => "PROFILE_NOT_FOUND",
            Self::EmailLinkedToOtherAccount => "EMAIL_LINKED_TO_OTHER_ACCOUNT",
            Self::ProductNotFound => "PRODUCT_NOT_FOUND",
            Self::TrainingTopicNotFound => "TRAINING_TOPIC_NOT_FOUND",
            Self::FaqNotFound => "FAQ_NOT_FOUND",
            Self::ChatTopicNotFound => "CHAT_TOPIC_NOT_FOUND",
            Self::MissingEmail => "MISSING_EMAIL",
            Self::EmptyMessage => "EMPTY_MESSAGE",
            Self::InvalidBody(_) => "INVALID_BODY",
            Self::ProfileRecoveryFailed(_) => "PROFILE_RECOVERY_FAILED",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl From<TokenError> for PortalError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Missing => Self::MissingToken,
            TokenError::KeysUnavailable(e) => Self::Internal(e.context("fetch signing keys")),
            _ => Self::InvalidToken,
        }
    }
}

impl From<JsonRejection> for PortalError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for PortalError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::MissingToken | Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::SubjectMismatch | Self::Forbidden => StatusCode::FORBIDDEN,
            Self::ProfileNotFound
            | Self::EmailLinkedToOtherAccount
            | Self::ProductNotFound
            | Self::TrainingTopicNotFound
            | Self::FaqNotFound
            | Self::ChatTopicNotFound => StatusCode::NOT_FOUND,
            Self::MissingEmail | Self::EmptyMessage | Self::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::ProfileRecoveryFailed(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if let Self::Internal(ref e) | Self::ProfileRecoveryFailed(ref e) = self {
            tracing::error!(error = %format!("{e:#}"), kind = self.kind(), "internal error");
        }
        let body = serde_json::json!({
            "success": false,
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
