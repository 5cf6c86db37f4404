//! Caller identity for Megalabs services.
//!
//! Extracts the `Authorization: Bearer` token and turns it into
//! [`claims::IdentityClaims`], either by decoding the payload as-is
//! ([`claims::decode_unverified`]) or by checking it against the identity
//! provider's signing keys ([`firebase::FirebaseVerifier`]).

pub mod bearer;
pub mod claims;
pub mod error;
pub mod firebase;
pub mod verifier;
