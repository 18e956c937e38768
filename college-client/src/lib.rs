//! Client for college-service: log in, fetch the student list, render it.

pub mod config;
pub mod error;

pub use config::ClientSettings;
pub use error::ClientError;

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use service_core::observability::TracedClientExt;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StudentSummary {
    pub id: String,
    pub name: String,
    pub department: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Holds the bearer token in memory for the lifetime of the client.
pub struct CollegeClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<Secret<String>>,
}

impl CollegeClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    /// `POST /auth/login` with a form body, keeping the returned token.
    pub async fn login(&mut self, username: &str, password: &Secret<String>) -> Result<(), ClientError> {
        let url = format!("{}/auth/login", self.base_url);
        let response = self
            .http
            .traced_post(&url)
            .form(&[("username", username), ("password", password.expose_secret().as_str())])
            .send()
            .await?;

        let body: LoginResponse = Self::parse(response).await?;
        self.token = Some(Secret::new(body.token));

        tracing::info!(username = %username, "Logged in");
        Ok(())
    }

    /// `GET /students/` with the stored bearer token.
    pub async fn list_students(&self) -> Result<Vec<StudentSummary>, ClientError> {
        let token = self.token.as_ref().ok_or(ClientError::NotLoggedIn)?;
        let url = format!("{}/students/", self.base_url);
        let response = self
            .http
            .traced_get(&url)
            .bearer_auth(token.expose_secret())
            .send()
            .await?;

        Self::parse(response).await
    }

    async fn parse<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.message)
            .unwrap_or_else(|_| status.canonical_reason().unwrap_or("Request failed").to_string());

        tracing::warn!(status = status.as_u16(), message = %message, "Request rejected");
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// `Students` heading followed by one `name - department` line per student.
pub fn render(students: &[StudentSummary]) -> String {
    let mut out = String::from("Students\n");
    for student in students {
        out.push_str(&format!("{} - {}\n", student.name, student.department));
    }
    out
}

/// Log in with the configured account and render the student list.
pub async fn run(settings: &ClientSettings) -> Result<String, ClientError> {
    let mut client = CollegeClient::new(settings.base_url.clone());
    client.login(&settings.username, &settings.password).await?;
    let students = client.list_students().await?;
    Ok(render(&students))
}
