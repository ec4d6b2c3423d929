//! sea-orm entities for the relations the API server reads.
//!
//! The schema itself is owned by the hosted database (tables and the
//! sign-up trigger are provisioned there), so this crate ships no migrations.

pub mod users;
