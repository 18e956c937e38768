use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use super::{CredentialProvider, ServiceError};
use crate::config::{JwtConfig, MIN_SECRET_BYTES};

/// Claims carried by every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (username)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// JWT ID
    pub jti: String,
}

/// The verified caller of a protected request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub subject: String,
    pub expires_at: i64,
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: i64,
}

/// Issues and verifies HS256 bearer tokens for the configured account.
///
/// Verification is stateless: nothing about issued tokens is stored.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
    credentials: Arc<dyn CredentialProvider>,
}

impl TokenService {
    pub fn new(
        secret: &Secret<String>,
        ttl: Duration,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        let secret = secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl,
            credentials,
        }
    }

    pub fn from_config(
        config: &JwtConfig,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, anyhow::Error> {
        if config.secret.expose_secret().len() < MIN_SECRET_BYTES {
            anyhow::bail!("JWT secret must be at least {} bytes", MIN_SECRET_BYTES);
        }
        if config.expiry_minutes <= 0 {
            anyhow::bail!("JWT expiry must be positive");
        }

        tracing::info!(
            expiry_minutes = config.expiry_minutes,
            "Token service initialized with HS256"
        );

        Ok(Self::new(
            &config.secret,
            Duration::minutes(config.expiry_minutes),
            credentials,
        ))
    }

    /// Exchange a username/password pair for a signed token.
    pub fn issue(&self, username: &str, password: &str) -> Result<IssuedToken, ServiceError> {
        if !self.credentials.verify(username, password) {
            tracing::warn!(username = %username, "Login rejected: invalid credentials");
            return Err(ServiceError::InvalidCredentials);
        }

        let now = Utc::now();
        let claims = TokenClaims {
            sub: username.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| anyhow::anyhow!("Failed to encode access token: {}", e))?;

        tracing::info!(subject = %claims.sub, jti = %claims.jti, "Access token issued");

        Ok(IssuedToken {
            token,
            expires_in: self.ttl.num_seconds(),
        })
    }

    /// Check signature and expiry of a bearer token.
    pub fn verify(&self, token: Option<&str>) -> Result<Identity, ServiceError> {
        let token = match token.map(str::trim) {
            Some(token) if !token.is_empty() => token,
            _ => return Err(ServiceError::MissingToken),
        };

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<TokenClaims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => ServiceError::ExpiredToken,
                _ => ServiceError::InvalidToken,
            }
        })?;

        Ok(Identity {
            subject: data.claims.sub,
            expires_at: data.claims.exp,
        })
    }
}
