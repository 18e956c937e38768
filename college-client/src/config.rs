use secrecy::Secret;
use service_core::config::{get_env, Environment};
use service_core::error::AppError;

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub username: String,
    pub password: Secret<String>,
    pub log_level: String,
}

impl ClientSettings {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let is_prod = Environment::from_env()?.is_prod();

        Ok(Self {
            base_url: get_env("COLLEGE_API_URL", Some("http://localhost:8080"), is_prod)?,
            username: get_env("COLLEGE_USERNAME", Some("admin"), is_prod)?,
            password: Secret::new(get_env("COLLEGE_PASSWORD", Some("admin123"), is_prod)?),
            log_level: get_env("LOG_LEVEL", Some("warn"), is_prod)?,
        })
    }
}
