//! Test utilities for Megalabs services.
//!
//! Provides `MockIdToken` for minting provider-shaped ID tokens.
//! Import in `#[cfg(test)]` blocks and `tests/` only, never in production code.

pub mod auth;
