//! # Error Handling
//!
//! This module provides unified error handling for the Brands service:
//! store-level [`RepositoryError`], domain-level [`BrandError`], and the
//! problem+json [`ApiError`] returned to HTTP clients with trace ID propagation.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::telemetry;
use crate::validation::FieldViolation;

/// Unified API error response structure
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApiError {
    /// HTTP status code for the response
    #[serde(skip_serializing, skip_deserializing)]
    pub status: StatusCode,
    /// Error code for programmatic handling
    pub code: Box<str>,
    /// Human-readable error message
    pub message: Box<str>,
    /// Additional error details (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Box<serde_json::Value>>,
    /// Suggested retry delay in seconds (optional)
    pub retry_after: Option<u64>,
    /// Correlation trace ID for debugging (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<Box<str>>,
}

impl ApiError {
    /// Create a new API error with the given status code and message
    pub fn new<S: Into<String>>(status: StatusCode, code: S, message: S) -> Self {
        Self {
            status,
            code: code.into().into_boxed_str(),
            message: message.into().into_boxed_str(),
            details: None,
            retry_after: None,
            trace_id: Self::current_trace_id(),
        }
    }

    /// Add details to the error
    pub fn with_details<V: Into<serde_json::Value>>(mut self, details: V) -> Self {
        self.details = Some(Box::new(details.into()));
        self
    }

    /// Set retry after delay
    pub fn with_retry_after(mut self, seconds: u64) -> Self {
        self.retry_after = Some(seconds);
        self
    }

    /// Extract current trace ID from the request context (falls back to generated correlation ID)
    fn current_trace_id() -> Option<Box<str>> {
        telemetry::current_trace_id()
            .map(|trace_id| trace_id.into_boxed_str())
            .or_else(|| {
                // Fallback: generate a correlation ID for basic client-server log correlation
                Some(format!("corr-{}", &Uuid::new_v4().to_string()[..8]).into_boxed_str())
            })
    }
}

/// Returns true when the database rejected a write because of a unique index.
pub fn is_unique_violation(error: &sea_orm::DbErr) -> bool {
    use sea_orm::RuntimeErr;

    const PG_UNIQUE: &str = "23505";
    const MYSQL_DUPLICATE_CODES: &[&str] = &["1022", "1062", "1169", "1586"];
    const SQLITE_DUPLICATE_CODES: &[&str] = &["1555", "2067"];

    let runtime_err = match error {
        sea_orm::DbErr::Query(RuntimeErr::SqlxError(sqlx_err))
        | sea_orm::DbErr::Exec(RuntimeErr::SqlxError(sqlx_err)) => sqlx_err,
        _ => return false,
    };

    let Some(db_error) = runtime_err.as_database_error() else {
        return false;
    };

    if db_error.is_unique_violation() {
        return true;
    }

    if let Some(code) = db_error.code() {
        let code_str = code.as_ref();
        if code_str == PG_UNIQUE
            || MYSQL_DUPLICATE_CODES.contains(&code_str)
            || SQLITE_DUPLICATE_CODES.contains(&code_str)
        {
            return true;
        }
    }

    false
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut headers = HeaderMap::new();
        headers.insert(
            "content-type",
            HeaderValue::from_static("application/problem+json"),
        );

        if let Some(retry_after) = self.retry_after
            && let Ok(header_value) = HeaderValue::from_str(&retry_after.to_string())
        {
            headers.insert("retry-after", header_value);
        }

        (self.status, headers, axum::Json(self)).into_response()
    }
}

/// Errors raised by a brand store.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(sea_orm::DbErr),
    #[error("record not found: {0}")]
    NotFound(String),
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
}

impl RepositoryError {
    /// Classifies a SeaORM error, separating unique-index rejections from other failures.
    pub fn database_error(error: sea_orm::DbErr) -> Self {
        if is_unique_violation(&error) {
            return RepositoryError::UniqueViolation(error.to_string());
        }
        match error {
            sea_orm::DbErr::RecordNotFound(record) => RepositoryError::NotFound(record),
            sea_orm::DbErr::RecordNotUpdated => {
                RepositoryError::NotFound("record was not updated".to_string())
            }
            other => RepositoryError::Database(other),
        }
    }
}

/// Outcomes of brand operations that callers are expected to branch on.
#[derive(Debug, Error)]
pub enum BrandError {
    #[error("brand failed validation ({} violation(s))", .0.len())]
    ValidationFailed(Vec<FieldViolation>),
    #[error("brand with name '{0}' already exists")]
    DuplicateName(String),
    #[error("brand not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Store(RepositoryError),
}

impl BrandError {
    pub fn not_found_id(id: Uuid) -> Self {
        BrandError::NotFound(format!("id {}", id))
    }

    pub fn not_found_name(name: &str) -> Self {
        BrandError::NotFound(format!("name '{}'", name))
    }
}

// Error mappers for common sources

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let message = match rejection {
            JsonRejection::JsonDataError(err) => format!("Invalid JSON: {}", err),
            JsonRejection::JsonSyntaxError(err) => format!("JSON syntax error: {}", err),
            JsonRejection::MissingJsonContentType(_) => {
                "Missing 'Content-Type: application/json' header".to_string()
            }
            _ => "Invalid request body".to_string(),
        };

        Self::new(StatusCode::BAD_REQUEST, "VALIDATION_FAILED", &message)
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "VALIDATION_FAILED",
            &format!("Invalid path parameter: {}", rejection.body_text()),
        )
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "VALIDATION_FAILED",
            &format!("Invalid query parameters: {}", rejection.body_text()),
        )
    }
}

impl From<RepositoryError> for ApiError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::UniqueViolation(detail) => {
                tracing::debug!(%detail, "Unique constraint violation detected");
                Self::new(StatusCode::CONFLICT, "CONFLICT", "Resource already exists")
            }
            RepositoryError::NotFound(record) => Self::new(
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                &format!("Record not found: {}", record),
            ),
            RepositoryError::Database(sea_orm::DbErr::Conn(connection_err)) => {
                tracing::error!("Database connection error: {:?}", connection_err);
                Self::new(
                    StatusCode::SERVICE_UNAVAILABLE,
                    "SERVICE_UNAVAILABLE",
                    "Database service unavailable",
                )
            }
            RepositoryError::Database(db_err) => {
                tracing::error!("Database error: {:?}", db_err);
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_SERVER_ERROR",
                    "Database error occurred",
                )
            }
        }
    }
}

impl From<BrandError> for ApiError {
    fn from(error: BrandError) -> Self {
        match error {
            BrandError::ValidationFailed(found) => {
                validation_error("Brand validation failed", json!({ "violations": found }))
            }
            BrandError::DuplicateName(name) => ApiError::new(
                StatusCode::CONFLICT,
                "DUPLICATE_NAME",
                &format!("Brand with name '{}' already exists", name),
            )
            .with_details(json!({ "field": "name", "name": name })),
            BrandError::NotFound(what) => ApiError::new(
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                &format!("Brand not found: {}", what),
            ),
            BrandError::Store(repo_err) => repo_err.into(),
        }
    }
}

/// Create a validation error with field details
pub fn validation_error(message: &str, field_errors: serde_json::Value) -> ApiError {
    ApiError::new(StatusCode::BAD_REQUEST, "VALIDATION_FAILED", message).with_details(field_errors)
}
