use secrecy::Secret;
use serde::{Deserialize, Serialize};

/// Login body, sent either as JSON or as a URL-encoded form.
///
/// Empty values are not rejected here; they simply fail the credential check.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: Secret<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    pub token_type: String,
    /// Lifetime in seconds
    pub expires_in: i64,
}

impl TokenResponse {
    pub fn bearer(token: String, expires_in: i64) -> Self {
        Self {
            token,
            token_type: "bearer".to_string(),
            expires_in,
        }
    }
}
