pub mod auth;
pub mod records;

pub use auth::{LoginRequest, TokenResponse};
pub use records::ListParams;
