use secrecy::{ExposeSecret, Secret};
use subtle::ConstantTimeEq;

use crate::config::CredentialsConfig;

/// Source of truth for who may log in.
pub trait CredentialProvider: Send + Sync {
    /// Returns true only when both values match exactly.
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// A single configured username/password pair.
pub struct StaticCredentials {
    username: String,
    password: Secret<String>,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: Secret<String>) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    pub fn from_config(config: &CredentialsConfig) -> Self {
        Self::new(config.username.clone(), config.password.clone())
    }
}

impl CredentialProvider for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        // Both comparisons always run so timing does not reveal which one failed.
        let user_ok = self.username.as_bytes().ct_eq(username.as_bytes());
        let pass_ok = self
            .password
            .expose_secret()
            .as_bytes()
            .ct_eq(password.as_bytes());
        (user_ok & pass_ok).into()
    }
}
