//! Cross-cutting plumbing shared by the ERP services.
//!
//! Tracing setup, the JSON error envelope, health payloads, HTTP middleware,
//! environment-config helpers and the shutdown signal live here so every
//! binary wires them the same way.

pub mod config;
pub mod error;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod shutdown;
pub mod tracing;
