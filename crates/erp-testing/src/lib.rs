//! Test utilities for the ERP services.
//!
//! Provides `MockIdentityProvider`, an in-process stand-in for the hosted
//! auth service. Import from tests only, never from production code.

pub mod identity;
