use axum::{extract::State, Json};
use serde_json::{json, Value};
use service_core::error::AppError;

use crate::AppState;

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": state.config.service_name,
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Ready once MongoDB answers a ping. Always ready on the in-memory store.
pub async fn readiness_check(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let mongodb = match &state.db {
        Some(db) => {
            db.health_check().await.map_err(|e| {
                tracing::error!(error = %e, "Readiness check failed");
                AppError::ServiceUnavailable
            })?;
            "up"
        }
        None => "not configured",
    };

    Ok(Json(json!({
        "status": "ready",
        "checks": { "mongodb": mongodb }
    })))
}
