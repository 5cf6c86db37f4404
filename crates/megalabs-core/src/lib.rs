//! Service plumbing shared by Megalabs binaries: health checks, request ids,
//! tracing setup and serde helpers.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
