pub mod auth;
pub mod enrollments;
pub mod health;
pub mod metrics;
pub mod records;

pub use auth::login;
pub use health::{health_check, readiness_check};
