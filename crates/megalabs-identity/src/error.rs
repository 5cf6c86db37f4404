use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Reasons a bearer token could not be turned into caller identity.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("no authorization token provided")]
    Missing,
    #[error("malformed token")]
    Malformed,
    #[error("token has no subject")]
    MissingSubject,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("token rejected")]
    Rejected,
    #[error("unknown signing key")]
    UnknownKey,
    #[error("signing keys unavailable")]
    KeysUnavailable(#[source] anyhow::Error),
}

impl TokenError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Missing => "MISSING_TOKEN",
            Self::KeysUnavailable(_) => "INTERNAL",
            _ => "INVALID_TOKEN",
        }
    }

    /// `true` when the caller is at fault, `false` for our own key-fetch failures.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::KeysUnavailable(_))
    }
}

impl IntoResponse for TokenError {
    fn into_response(self) -> Response {
        let status = if self.is_client_error() {
            StatusCode::UNAUTHORIZED
        } else {
            tracing::error!(error = %self, "token verification unavailable");
            StatusCode::INTERNAL_SERVER_ERROR
        };
        let body = serde_json::json!({
            "success": false,
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
