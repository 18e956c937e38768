use axum::{extract::State, Json};
use secrecy::ExposeSecret;
use service_core::error::AppError;

use crate::dtos::{LoginRequest, TokenResponse};
use crate::services::TokenService;
use crate::utils::JsonOrForm;

/// `POST /auth/login`
pub async fn login(
    State(tokens): State<TokenService>,
    JsonOrForm(req): JsonOrForm<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let issued = tokens.issue(&req.username, req.password.expose_secret())?;
    Ok(Json(TokenResponse::bearer(issued.token, issued.expires_in)))
}
