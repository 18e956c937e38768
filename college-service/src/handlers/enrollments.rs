use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;

use crate::models::{EnrollmentChanges, EnrollmentResponse, NewEnrollment};
use crate::services::EnrollmentService;
use crate::utils::ApiJson;

pub async fn create(
    State(service): State<EnrollmentService>,
    ApiJson(fields): ApiJson<NewEnrollment>,
) -> Result<impl IntoResponse, AppError> {
    let enrollment = service.create(fields).await?;
    Ok((StatusCode::CREATED, Json(EnrollmentResponse::from(enrollment))))
}

pub async fn update(
    State(service): State<EnrollmentService>,
    Path(id): Path<String>,
    ApiJson(changes): ApiJson<EnrollmentChanges>,
) -> Result<Json<EnrollmentResponse>, AppError> {
    let enrollment = service.update(&id, changes).await?;
    Ok(Json(EnrollmentResponse::from(enrollment)))
}
