use super::common::{message_response, success_response, validate_input, DeleteParams};
use crate::{
    dto::locations::{BinNode, BinOccupancy, UpdateBinRequest},
    errors::ApiError,
    handlers::AppState,
    repositories::LevelStore,
    ApiResponse,
};
use axum::{
    extract::{Json, Path, Query, State},
    response::IntoResponse,
    routing::get,
    Router,
};

/// Creates the router for bin endpoints
pub fn bin_routes() -> Router<AppState> {
    Router::new()
        .route("/bins/:id", get(get_bin).put(update_bin).delete(delete_bin))
        .route("/bins/:id/occupancy", get(get_bin_occupancy))
}

/// Get a bin with its current stock
#[utoipa::path(
    get,
    path = "/api/v1/bins/{id}",
    params(("id" = i32, Path, description = "Bin ID")),
    responses(
        (status = 200, description = "Bin retrieved", body = ApiResponse<BinNode>),
        (status = 404, description = "Bin not found"),
    ),
    tag = "bins"
)]
pub async fn get_bin(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let bin = state.services.bins.get(id).await?;
    Ok(success_response("Bin retrieved", bin))
}

/// Rename, recapacitate or move a bin
#[utoipa::path(
    put,
    path = "/api/v1/bins/{id}",
    params(("id" = i32, Path, description = "Bin ID")),
    request_body = UpdateBinRequest,
    responses(
        (status = 200, description = "Bin updated", body = ApiResponse<BinNode>),
        (status = 404, description = "Bin or target shelf not found"),
        (status = 409, description = "New capacity is below the stock already placed"),
    ),
    tag = "bins"
)]
pub async fn update_bin(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateBinRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    let bin = state.services.bins.update(id, &payload).await?;
    Ok(success_response("Bin updated", bin))
}

/// Delete an empty bin
#[utoipa::path(
    delete,
    path = "/api/v1/bins/{id}",
    params(
        ("id" = i32, Path, description = "Bin ID"),
        DeleteParams,
    ),
    responses(
        (status = 200, description = "Bin deleted"),
        (status = 404, description = "Bin not found"),
        (status = 409, description = "Bin still contains items"),
    ),
    tag = "bins"
)]
pub async fn delete_bin(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(params): Query<DeleteParams>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .bins
        .delete(Some(id), params.parent_id, None)
        .await?;
    Ok(message_response("Bin deleted"))
}

/// Capacity and current stock of a bin
#[utoipa::path(
    get,
    path = "/api/v1/bins/{id}/occupancy",
    params(("id" = i32, Path, description = "Bin ID")),
    responses(
        (status = 200, description = "Bin occupancy", body = ApiResponse<BinOccupancy>),
        (status = 404, description = "Bin not found"),
    ),
    tag = "bins"
)]
pub async fn get_bin_occupancy(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let occupancy = state.services.bins.occupancy(id).await?;
    Ok(success_response("Bin occupancy retrieved", occupancy))
}
