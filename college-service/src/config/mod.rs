use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use service_core::config::{self as core_config, get_env, get_env_parsed, Environment};
use service_core::error::AppError;
use std::env;

/// Minimum length, in bytes, of the HS256 signing secret.
pub const MIN_SECRET_BYTES: usize = 32;

#[derive(Debug, Clone, Deserialize)]
pub struct CollegeConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub environment: Environment,
    pub service_name: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub mongodb: MongoConfig,
    pub jwt: JwtConfig,
    pub credentials: CredentialsConfig,
    pub security: SecurityConfig,
    pub seed_demo_data: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: Secret<String>,
    pub expiry_minutes: i64,
}

/// The single account allowed to log in.
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsConfig {
    pub username: String,
    pub password: Secret<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    pub allowed_origins: Vec<String>,
}

impl CollegeConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;

        let environment = Environment::from_env()?;
        let is_prod = environment.is_prod();

        let config = CollegeConfig {
            common: common_config,
            environment,
            service_name: get_env("SERVICE_NAME", Some("college-service"), is_prod)?,
            log_level: get_env("LOG_LEVEL", Some("info"), is_prod)?,
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|s| !s.is_empty()),
            mongodb: MongoConfig {
                uri: get_env("MONGODB_URI", None, is_prod)?,
                database: get_env("MONGODB_DATABASE", Some("collegeDB"), is_prod)?,
            },
            jwt: JwtConfig {
                // No default in any environment: an unsigned fallback would
                // let anyone mint tokens.
                secret: Secret::new(get_env("JWT_SECRET", None, is_prod)?),
                expiry_minutes: get_env_parsed("JWT_EXPIRY_MINUTES", Some("60"), is_prod)?,
            },
            credentials: CredentialsConfig {
                username: get_env("AUTH_USERNAME", Some("admin"), is_prod)?,
                password: Secret::new(get_env("AUTH_PASSWORD", Some("admin123"), is_prod)?),
            },
            security: SecurityConfig {
                allowed_origins: get_env(
                    "ALLOWED_ORIGINS",
                    Some("http://localhost:3000"),
                    is_prod,
                )?
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            },
            seed_demo_data: get_env_parsed("SEED_DEMO_DATA", Some("false"), is_prod)?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.jwt.secret.expose_secret().len() < MIN_SECRET_BYTES {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "JWT_SECRET must be at least {} bytes",
                MIN_SECRET_BYTES
            )));
        }

        if self.jwt.expiry_minutes <= 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "JWT_EXPIRY_MINUTES must be positive"
            )));
        }

        if self.credentials.username.is_empty() || self.credentials.password.expose_secret().is_empty()
        {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "AUTH_USERNAME and AUTH_PASSWORD must not be empty"
            )));
        }

        if self.environment.is_prod() {
            if self.security.allowed_origins.iter().any(|o| o == "*") {
                return Err(AppError::ConfigError(anyhow::anyhow!(
                    "Wildcard CORS origin not allowed in production"
                )));
            }

            if self.seed_demo_data {
                tracing::warn!("SEED_DEMO_DATA is enabled in production");
            }
        }

        Ok(())
    }
}
