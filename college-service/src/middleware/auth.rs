use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use service_core::error::AppError;

use crate::services::{Identity, ServiceError, TokenService};

/// Gate for every record route.
///
/// Requests without a valid, unexpired bearer token are answered with 401
/// here and never reach a handler.
pub async fn auth_middleware(
    State(tokens): State<TokenService>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .map(|value| value.to_str().map_err(|_| ServiceError::InvalidToken))
        .transpose()?;

    let token = match header_value {
        None => None,
        Some(value) => match value.split_once(' ') {
            // Auth schemes are case-insensitive.
            Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => Some(token.trim()),
            _ => {
                tracing::debug!("Authorization header without Bearer scheme");
                return Err(ServiceError::InvalidToken.into());
            }
        },
    };

    let identity = tokens.verify(token).map_err(|e| {
        tracing::debug!(reason = %e, "Rejected unauthenticated request");
        e
    })?;

    tracing::Span::current().record("subject", identity.subject.as_str());
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

/// The identity the gate attached to the request.
pub struct AuthUser(pub Identity);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let identity = parts.extensions.get::<Identity>().ok_or_else(|| {
            AppError::InternalError(anyhow::anyhow!(
                "Identity missing from request extensions"
            ))
        })?;

        Ok(AuthUser(identity.clone()))
    }
}
