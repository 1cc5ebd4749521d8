//! # API Handlers
//!
//! This module contains the HTTP endpoint handlers for the Brands service.

use axum::{extract::State, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db;
use crate::error::ApiError;
use crate::models::ServiceInfo;
use crate::server::AppState;

pub mod brands;

/// Health check response body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    #[schema(example = "ok")]
    pub status: String,
}

impl HealthStatus {
    fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
        }
    }
}

/// Root handler that returns basic service information
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service information", body = ServiceInfo)
    ),
    tag = "root"
)]
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo::default())
}

/// Liveness check; never touches the database
#[utoipa::path(
    get,
    path = "/healthz",
    responses(
        (status = 200, description = "Process is alive", body = HealthStatus)
    ),
    tag = "health"
)]
pub async fn healthz() -> Json<HealthStatus> {
    Json(HealthStatus::new("ok"))
}

/// Readiness check; succeeds once the database answers
#[utoipa::path(
    get,
    path = "/readyz",
    responses(
        (status = 200, description = "Ready to serve traffic", body = HealthStatus),
        (status = 503, description = "Database unavailable", body = ApiError)
    ),
    tag = "health"
)]
pub async fn readyz(State(state): State<AppState>) -> Result<Json<HealthStatus>, ApiError> {
    if let Err(err) = db::health_check(&state.db).await {
        tracing::warn!(error = %err, "Readiness check failed");
        return Err(ApiError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "SERVICE_UNAVAILABLE",
            "Database unavailable",
        )
        .with_retry_after(5));
    }

    Ok(Json(HealthStatus::new("ready")))
}
