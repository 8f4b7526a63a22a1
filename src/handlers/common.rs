use crate::errors::ServiceError;
use crate::ApiResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;
use validator::Validate;

/// Standard success response
pub fn success_response<T: Serialize>(message: &str, data: T) -> Response {
    (
        StatusCode::OK,
        Json(ApiResponse::success(StatusCode::OK, message, data)),
    )
        .into_response()
}

/// Standard created response
pub fn created_response<T: Serialize>(message: &str, data: T) -> Response {
    (
        StatusCode::CREATED,
        Json(ApiResponse::success(StatusCode::CREATED, message, data)),
    )
        .into_response()
}

/// Success response for list endpoints, carrying the item count
pub fn list_response<T: Serialize>(message: &str, items: Vec<T>, item_count: u64) -> Response {
    (
        StatusCode::OK,
        Json(ApiResponse::success(StatusCode::OK, message, items).with_item_count(item_count)),
    )
        .into_response()
}

/// Success response without a result payload
pub fn message_response(message: &str) -> Response {
    let body: ApiResponse<()> = ApiResponse {
        status_code: StatusCode::OK.as_u16(),
        is_success: true,
        message: message.to_string(),
        result: None,
        item_count: None,
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// Validate request input
pub fn validate_input<T: Validate>(input: &T) -> Result<(), ServiceError> {
    input
        .validate()
        .map_err(|e| ServiceError::ValidationError(format!("Validation failed: {}", e)))
}

/// Pagination parameters for list operations
#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

impl PaginationParams {
    /// One-based page number
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }
}

/// Optional parent check for single-node deletes
#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteParams {
    /// When given, the node must belong to this parent.
    pub parent_id: Option<i32>,
}
