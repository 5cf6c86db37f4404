use std::sync::Arc;

use crate::claims::{IdentityClaims, decode_unverified};
use crate::error::TokenError;
use crate::firebase::FirebaseVerifier;

/// How bearer tokens are turned into [`IdentityClaims`].
///
/// The mode is chosen once at startup and both paths stay distinguishable:
/// claims record their [`crate::claims::ClaimsSource`].
#[derive(Clone)]
pub enum TokenVerifier {
    /// Decode the payload only. The signature is never checked, so any client
    /// can claim any subject. Parity/testing deployments only.
    Unverified,
    /// Check signature, expiry, audience and issuer against Firebase's keys.
    Firebase(Arc<FirebaseVerifier>),
}

impl TokenVerifier {
    pub async fn verify(&self, token: &str) -> Result<IdentityClaims, TokenError> {
        match self {
            Self::Unverified => decode_unverified(token),
            Self::Firebase(verifier) => verifier.verify(token).await,
        }
    }
}
