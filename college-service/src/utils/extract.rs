use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::de::DeserializeOwned;
use service_core::error::AppError;

/// JSON body whose rejections render as [`AppError`].
///
/// Malformed JSON is a 400; well-formed JSON with missing or mistyped
/// fields is a 422.
pub struct ApiJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(JsonRejection::JsonDataError(e)) => {
                Err(AppError::Unprocessable(anyhow::anyhow!(e.body_text())))
            }
            Err(JsonRejection::JsonSyntaxError(e)) => {
                Err(AppError::BadRequest(anyhow::anyhow!(e.body_text())))
            }
            Err(e) => Err(AppError::BadRequest(anyhow::anyhow!(e.body_text()))),
        }
    }
}

/// Accepts either a JSON or an `application/x-www-form-urlencoded` body.
pub struct JsonOrForm<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for JsonOrForm<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.starts_with("application/x-www-form-urlencoded"))
            .unwrap_or(false);

        if is_form {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::Unprocessable(anyhow::anyhow!(e.body_text())))?;
            return Ok(JsonOrForm(value));
        }

        let ApiJson(value) = ApiJson::<T>::from_request(req, state).await?;
        Ok(JsonOrForm(value))
    }
}
