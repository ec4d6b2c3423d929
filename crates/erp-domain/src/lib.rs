//! Domain types shared across the ERP services.
//!
//! This crate contains only pure types with no framework dependencies.

pub mod user;
