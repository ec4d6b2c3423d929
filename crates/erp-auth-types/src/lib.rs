//! Session plumbing shared by ERP services.
//!
//! Provides the `SessionToken` extractor and the session cookie builders.

pub mod cookie;
pub mod session;
