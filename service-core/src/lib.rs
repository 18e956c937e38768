//! Shared plumbing for the college services: the HTTP error type, layered
//! configuration, logging and tracing setup, and common middleware.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;

pub use axum;
pub use mongodb;
pub use serde_json;
pub use tokio;
pub use tracing;
