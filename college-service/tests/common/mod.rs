//! Shared setup for college-service integration tests.
//!
//! Routers are built over in-memory stores and driven in-process with
//! `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use college_service::{
    build_router,
    config::{CollegeConfig, CredentialsConfig, JwtConfig, MongoConfig, SecurityConfig},
    AppState,
};
use secrecy::Secret;
use serde_json::Value;
use service_core::config::{Config, Environment};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";
pub const TEST_USERNAME: &str = "admin";
pub const TEST_PASSWORD: &str = "admin123";

pub fn test_config() -> CollegeConfig {
    CollegeConfig {
        common: Config { port: 0 },
        environment: Environment::Dev,
        service_name: "college-service".to_string(),
        log_level: "error".to_string(),
        otlp_endpoint: None,
        mongodb: MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: "collegeDB_test".to_string(),
        },
        jwt: JwtConfig {
            secret: Secret::new(TEST_SECRET.to_string()),
            expiry_minutes: 60,
        },
        credentials: CredentialsConfig {
            username: TEST_USERNAME.to_string(),
            password: Secret::new(TEST_PASSWORD.to_string()),
        },
        security: SecurityConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
        seed_demo_data: false,
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(test_config()).await
    }

    pub async fn spawn_with(config: CollegeConfig) -> Self {
        let state = AppState::in_memory(config).expect("Failed to build in-memory state");
        let router = build_router(state.clone())
            .await
            .expect("Failed to build router");
        Self { router, state }
    }

    /// Send a request and return the status plus the JSON body (`Null` when empty).
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed to respond");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    pub async fn login(&self) -> String {
        let (status, body) = self
            .send(json_request(
                "POST",
                "/auth/login",
                None,
                &serde_json::json!({ "username": TEST_USERNAME, "password": TEST_PASSWORD }),
            ))
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        body["token"]
            .as_str()
            .expect("token missing from login response")
            .to_string()
    }
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn raw_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}
