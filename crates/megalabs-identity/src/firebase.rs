//! Signature-verified Firebase ID tokens.
//!
//! Firebase signs ID tokens with RS256 keys published as a JWKS document. A
//! token is accepted when its `kid` names a published key, the signature
//! checks out, it has not expired, `aud` equals the project id and `iss` is
//! `https://securetoken.google.com/<project id>`.

use std::time::{Duration, Instant};

use anyhow::Context as _;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use tokio::sync::RwLock;

use crate::claims::{ClaimsSource, IdentityClaims, RawClaims};
use crate::error::TokenError;

/// Google's published signing keys for Firebase ID tokens.
pub const FIREBASE_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

const ISSUER_PREFIX: &str = "https://securetoken.google.com/";

/// Google rotates keys daily; an hour keeps us well inside that window.
const KEY_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Minimum gap between refetches triggered by an unknown `kid`.
const REFRESH_COOLDOWN: Duration = Duration::from_secs(60);

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

enum KeySource {
    Remote { url: String, http: reqwest::Client },
    Static,
}

struct CachedKeys {
    set: JwkSet,
    /// `None` for static key sets, which never expire.
    fetched_at: Option<Instant>,
}

impl CachedKeys {
    fn is_fresh(&self) -> bool {
        self.fetched_at.is_none_or(|at| at.elapsed() < KEY_CACHE_TTL)
    }

    /// A refetch for `kid` can be skipped: the set is fresh and either holds
    /// `kid` or was fetched too recently to have rotated since.
    fn covers(&self, kid: &str) -> bool {
        self.is_fresh()
            && (self.set.find(kid).is_some()
                || self
                    .fetched_at
                    .is_none_or(|at| at.elapsed() < REFRESH_COOLDOWN))
    }
}

pub struct FirebaseVerifier {
    project_id: String,
    algorithm: Algorithm,
    source: KeySource,
    keys: RwLock<Option<CachedKeys>>,
}

impl FirebaseVerifier {
    /// Verifier that fetches keys from `jwks_url` on first use and caches them.
    pub fn new(
        project_id: impl Into<String>,
        jwks_url: impl Into<String>,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .context("build JWKS client")?;
        Ok(Self {
            project_id: project_id.into(),
            algorithm: Algorithm::RS256,
            source: KeySource::Remote {
                url: jwks_url.into(),
                http,
            },
            keys: RwLock::new(None),
        })
    }

    /// Verifier over a fixed key set. Never touches the network.
    pub fn with_keys(project_id: impl Into<String>, keys: JwkSet, algorithm: Algorithm) -> Self {
        Self {
            project_id: project_id.into(),
            algorithm,
            source: KeySource::Static,
            keys: RwLock::new(Some(CachedKeys {
                set: keys,
                fetched_at: None,
            })),
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub async fn verify(&self, token: &str) -> Result<IdentityClaims, TokenError> {
        let header = decode_header(token).map_err(|_| TokenError::Malformed)?;
        let kid = header.kid.ok_or(TokenError::UnknownKey)?;
        let key = self.decoding_key(&kid).await?;

        let mut validation = Validation::new(self.algorithm);
        validation.set_audience(&[&self.project_id]);
        validation.set_issuer(&[format!("{ISSUER_PREFIX}{}", self.project_id)]);
        validation.set_required_spec_claims(&["exp", "sub", "aud", "iss"]);

        let data = decode::<RawClaims>(token, &key, &validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::InvalidToken => TokenError::Malformed,
            _ => TokenError::Rejected,
        })?;

        IdentityClaims::from_raw(data.claims, ClaimsSource::Verified)
    }

    async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, TokenError> {
        if let Some(key) = self.cached_key(kid).await? {
            return Ok(key);
        }
        // Unknown kid or stale cache: keys may have rotated.
        self.refresh_keys(kid).await?;
        self.cached_key(kid).await?.ok_or(TokenError::UnknownKey)
    }

    async fn cached_key(&self, kid: &str) -> Result<Option<DecodingKey>, TokenError> {
        let guard = self.keys.read().await;
        let Some(cached) = guard.as_ref().filter(|c| c.is_fresh()) else {
            return Ok(None);
        };
        cached
            .set
            .find(kid)
            .map(|jwk| DecodingKey::from_jwk(jwk).map_err(|_| TokenError::UnknownKey))
            .transpose()
    }

    /// Refetch the key set. Callers queue on the write lock, so concurrent
    /// misses for the same rotation share one fetch.
    async fn refresh_keys(&self, kid: &str) -> Result<(), TokenError> {
        let KeySource::Remote { url, http } = &self.source else {
            return Ok(());
        };
        let mut guard = self.keys.write().await;
        if guard.as_ref().is_some_and(|cached| cached.covers(kid)) {
            return Ok(());
        }
        let set = fetch_jwks(http, url)
            .await
            .map_err(TokenError::KeysUnavailable)?;
        tracing::info!(keys = set.keys.len(), "refreshed identity provider signing keys");
        *guard = Some(CachedKeys {
            set,
            fetched_at: Some(Instant::now()),
        });
        Ok(())
    }
}

async fn fetch_jwks(http: &reqwest::Client, url: &str) -> anyhow::Result<JwkSet> {
    http.get(url)
        .send()
        .await
        .context("request JWKS")?
        .error_for_status()
        .context("JWKS status")?
        .json::<JwkSet>()
        .await
        .context("decode JWKS")
}
