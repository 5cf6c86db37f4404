//! `Authorization: Bearer <token>` extractor.

use axum::extract::FromRequestParts;
use http::header::AUTHORIZATION;
use http::request::Parts;

use crate::error::TokenError;

const BEARER_PREFIX: &str = "Bearer ";

/// Raw bearer token taken from the `Authorization` header.
///
/// Rejects with [`TokenError::Missing`] (401) when the header is absent, not
/// valid ASCII, lacks the exact `Bearer ` prefix, or carries an empty token.
/// The token itself is not inspected here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(pub String);

impl BearerToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse an `Authorization` header value.
    pub fn from_header_value(value: &str) -> Option<Self> {
        let token = value.strip_prefix(BEARER_PREFIX)?.trim();
        if token.is_empty() {
            return None;
        }
        Some(Self(token.to_owned()))
    }
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = TokenError;

    // Read the header synchronously and return a 'static future; an `async fn`
    // here would capture the `parts` lifetime (E0195 under axum-core 0.5).
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(Self::from_header_value);

        async move { token.ok_or(TokenError::Missing) }
    }
}
