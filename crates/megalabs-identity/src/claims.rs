//! Identity claims carried by provider-issued ID tokens.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use serde::Deserialize;

use crate::error::TokenError;

/// How the claims were obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimsSource {
    /// Payload decoded without checking the signature. Anyone can mint these.
    Unverified,
    /// Signature, expiry, audience and issuer checked against the provider.
    Verified,
}

/// Claims payload as issued by the provider. Every field is optional on the
/// wire; [`IdentityClaims::from_raw`] decides what is required.
#[derive(Debug, Default, Deserialize)]
pub struct RawClaims {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// Caller identity extracted from a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityClaims {
    /// Provider subject (`user_id`, falling back to `sub`).
    pub subject: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub phone: Option<String>,
    pub source: ClaimsSource,
}

impl IdentityClaims {
    /// Normalize raw claims. The subject is the first non-empty of `user_id`
    /// and `sub`; blank optional claims become `None`.
    pub fn from_raw(raw: RawClaims, source: ClaimsSource) -> Result<Self, TokenError> {
        let subject = non_empty(raw.user_id)
            .or_else(|| non_empty(raw.sub))
            .ok_or(TokenError::MissingSubject)?;
        Ok(Self {
            subject,
            email: non_empty(raw.email),
            display_name: non_empty(raw.name),
            phone: non_empty(raw.phone_number),
            source,
        })
    }
}

/// Decode the payload segment of a `header.payload.signature` token **without
/// verifying the signature**.
///
/// Kept for parity with deployments that trust the provider's client SDK; the
/// resulting claims are tagged [`ClaimsSource::Unverified`].
pub fn decode_unverified(token: &str) -> Result<IdentityClaims, TokenError> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(TokenError::Malformed);
    };

    let bytes = decode_segment(payload).ok_or(TokenError::Malformed)?;
    let raw: RawClaims = serde_json::from_slice(&bytes).map_err(|_| TokenError::Malformed)?;
    IdentityClaims::from_raw(raw, ClaimsSource::Unverified)
}

/// base64url is the JWT encoding, but some issuers pad or use the standard
/// alphabet; accept both.
fn decode_segment(segment: &str) -> Option<Vec<u8>> {
    let trimmed = segment.trim_end_matches('=');
    URL_SAFE_NO_PAD
        .decode(trimmed)
        .or_else(|_| STANDARD_NO_PAD.decode(trimmed))
        .ok()
}

pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
