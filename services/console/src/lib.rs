pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod infra;
pub mod listing;
pub mod router;
pub mod shell;
pub mod state;
