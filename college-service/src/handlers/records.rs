//! CRUD handlers shared by every entity type.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;

use crate::dtos::ListParams;
use crate::middleware::AuthUser;
use crate::models::Record;
use crate::services::RecordService;
use crate::utils::ApiJson;

pub(crate) fn list_params(
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<ListParams, AppError> {
    params
        .map(|Query(params)| params)
        .map_err(|e| AppError::BadRequest(anyhow::anyhow!(e.body_text())))
}

pub async fn list<R: Record>(
    State(service): State<RecordService<R>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<R::Response>>, AppError> {
    let page = list_params(params)?.into();
    let records = service.list(page).await?;
    Ok(Json(records.into_iter().map(R::Response::from).collect()))
}

pub async fn create<R: Record>(
    State(service): State<RecordService<R>>,
    AuthUser(identity): AuthUser,
    ApiJson(fields): ApiJson<R::Create>,
) -> Result<impl IntoResponse, AppError> {
    let record = service.create(fields).await?;
    tracing::debug!(
        kind = R::KIND,
        id = %record.id(),
        subject = %identity.subject,
        "Record created on behalf of caller"
    );
    Ok((StatusCode::CREATED, Json(R::Response::from(record))))
}

pub async fn get<R: Record>(
    State(service): State<RecordService<R>>,
    Path(id): Path<String>,
) -> Result<Json<R::Response>, AppError> {
    let record = service.get(&id).await?;
    Ok(Json(R::Response::from(record)))
}

pub async fn update<R: Record>(
    State(service): State<RecordService<R>>,
    Path(id): Path<String>,
    ApiJson(changes): ApiJson<R::Update>,
) -> Result<Json<R::Response>, AppError> {
    let record = service.update(&id, changes).await?;
    Ok(Json(R::Response::from(record)))
}

pub async fn delete<R: Record>(
    State(service): State<RecordService<R>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
