use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::error::DbErr;
use tracing::{error, warn};

use crate::ApiResponse;

fn current_request_id() -> Option<String> {
    crate::tracing::current_request_id().map(|rid| rid.as_str().to_string())
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// An owned transaction was rolled back because something inside it failed.
    #[error("{level} transaction failed and rolled back: {source}")]
    TransactionFailed {
        level: &'static str,
        #[source]
        source: Box<ServiceError>,
    },

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(err.to_string())
    }
}

impl ServiceError {
    pub fn not_found(level: &str, id: i32) -> Self {
        ServiceError::NotFound(format!("{} with ID {} not found", level, id))
    }

    /// Wraps an error raised inside a transaction this level opened itself.
    pub fn rolled_back(level: &'static str, source: ServiceError) -> Self {
        ServiceError::TransactionFailed {
            level,
            source: Box::new(source),
        }
    }

    /// Strips transaction wrappers down to the error that caused the rollback.
    pub fn root_cause(&self) -> &ServiceError {
        match self {
            Self::TransactionFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::TransactionFailed { source, .. } => source.status_code(),
            Self::DatabaseError(_) | Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let request_id = current_request_id();

        if status.is_server_error() {
            error!(request_id = ?request_id, error = %self, "Request failed");
        } else {
            warn!(request_id = ?request_id, error = %self, "Request rejected");
        }

        let body = ApiResponse::<()>::failure(status, self.to_string());
        (status, Json(body)).into_response()
    }
}

pub type AppError = ServiceError;
pub type ApiError = ServiceError;
