pub mod config;
pub mod dtos;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;
pub mod utils;

use axum::{
    extract::FromRef,
    http::{header, HeaderName, HeaderValue, Method},
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware,
    security_headers::security_headers_middleware,
    tracing::{make_request_span, request_id_middleware, REQUEST_ID_HEADER},
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::CollegeConfig;
use crate::models::{Course, Enrollment, Record, Student};
use crate::services::{
    EnrollmentService, MemoryStore, MongoDb, RecordService, RecordStore, StaticCredentials,
    TokenService,
};

#[derive(Clone)]
pub struct AppState {
    pub config: CollegeConfig,
    pub token_service: TokenService,
    pub students: RecordService<Student>,
    pub courses: RecordService<Course>,
    pub enrollments: EnrollmentService,
    /// `None` when running on the in-memory store.
    pub db: Option<MongoDb>,
}

impl AppState {
    pub fn new(
        config: CollegeConfig,
        students: Arc<dyn RecordStore<Student>>,
        courses: Arc<dyn RecordStore<Course>>,
        enrollments: Arc<dyn RecordStore<Enrollment>>,
        db: Option<MongoDb>,
    ) -> Result<Self, AppError> {
        let credentials = Arc::new(StaticCredentials::from_config(&config.credentials));
        let token_service =
            TokenService::from_config(&config.jwt, credentials).map_err(AppError::ConfigError)?;

        let students = RecordService::new(students);
        let courses = RecordService::new(courses);
        let enrollments = EnrollmentService::new(
            RecordService::new(enrollments),
            students.clone(),
            courses.clone(),
        );

        Ok(Self {
            config,
            token_service,
            students,
            courses,
            enrollments,
            db,
        })
    }

    pub fn with_mongo(config: CollegeConfig, db: MongoDb) -> Result<Self, AppError> {
        Self::new(
            config,
            Arc::new(db.students()),
            Arc::new(db.courses()),
            Arc::new(db.enrollments()),
            Some(db),
        )
    }

    pub fn in_memory(config: CollegeConfig) -> Result<Self, AppError> {
        Self::new(
            config,
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryStore::new()),
            None,
        )
    }
}

impl FromRef<AppState> for TokenService {
    fn from_ref(state: &AppState) -> Self {
        state.token_service.clone()
    }
}

impl FromRef<AppState> for RecordService<Student> {
    fn from_ref(state: &AppState) -> Self {
        state.students.clone()
    }
}

impl FromRef<AppState> for RecordService<Course> {
    fn from_ref(state: &AppState) -> Self {
        state.courses.clone()
    }
}

impl FromRef<AppState> for RecordService<Enrollment> {
    fn from_ref(state: &AppState) -> Self {
        state.enrollments.records().clone()
    }
}

impl FromRef<AppState> for EnrollmentService {
    fn from_ref(state: &AppState) -> Self {
        state.enrollments.clone()
    }
}

/// `/{path}`, `/{path}/` and `/{path}/:id` for one entity type.
fn record_routes<R>(path: &str) -> Router<AppState>
where
    R: Record,
    RecordService<R>: FromRef<AppState>,
{
    use crate::handlers::records;

    let collection = get(records::list::<R>).post(records::create::<R>);

    Router::new()
        .route(path, collection.clone())
        .route(&format!("{}/", path), collection)
        .route(
            &format!("{}/:id", path),
            get(records::get::<R>)
                .put(records::update::<R>)
                .delete(records::delete::<R>),
        )
}

fn enrollment_routes() -> Router<AppState> {
    use crate::handlers::{enrollments, records};

    let collection = get(records::list::<Enrollment>).post(enrollments::create);

    Router::new()
        .route("/enrollments", collection.clone())
        .route("/enrollments/", collection)
        .route(
            "/enrollments/:id",
            get(records::get::<Enrollment>)
                .put(enrollments::update)
                .delete(records::delete::<Enrollment>),
        )
}

fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer, AppError> {
    let origins = allowed_origins
        .iter()
        .map(|origin| {
            origin.parse::<HeaderValue>().map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!(
                    "Invalid CORS origin '{}': {}",
                    origin,
                    e
                ))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ]))
}

pub async fn build_router(state: AppState) -> Result<Router, AppError> {
    // Everything under the record routes sits behind the bearer-token gate.
    let protected = Router::new()
        .merge(record_routes::<Student>("/students"))
        .merge(record_routes::<Course>("/courses"))
        .merge(enrollment_routes())
        .route_layer(from_fn_with_state(
            state.token_service.clone(),
            crate::middleware::auth_middleware,
        ));

    let cors = cors_layer(&state.config.security.allowed_origins)?;

    let app = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics::metrics))
        .route("/auth/login", post(handlers::login))
        .merge(protected)
        .with_state(state)
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<axum::body::Body>))
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors);

    Ok(app)
}
