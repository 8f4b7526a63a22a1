use super::common::{
    created_response, list_response, message_response, success_response, validate_input,
    DeleteParams,
};
use crate::{
    dto::locations::{BinNode, CreateBinRequest, ShelfNode, UpdateShelfRequest},
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

/// Creates the router for shelf endpoints
pub fn shelf_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/shelves/:id",
            get(get_shelf).put(update_shelf).delete(delete_shelf),
        )
        .route("/shelves/:id/bins", get(list_bins).post(create_bin))
}

/// Get a shelf with its subtree
#[utoipa::path(
    get,
    path = "/api/v1/shelves/{id}",
    params(("id" = i32, Path, description = "Shelf ID")),
    responses(
        (status = 200, description = "Shelf retrieved", body = ApiResponse<ShelfNode>),
        (status = 404, description = "Shelf not found"),
    ),
    tag = "shelves"
)]
pub async fn get_shelf(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let shelf = state.services.shelves.get(id).await?;
    Ok(success_response("Shelf retrieved", shelf))
}

/// Update a shelf, reconciling its bins when a bin list is given
#[utoipa::path(
    put,
    path = "/api/v1/shelves/{id}",
    params(("id" = i32, Path, description = "Shelf ID")),
    request_body = UpdateShelfRequest,
    responses(
        (status = 200, description = "Shelf updated", body = ApiResponse<ShelfNode>),
        (status = 404, description = "Shelf or listed bin not found"),
        (status = 409, description = "A bin dropped from the list still holds stock"),
    ),
    tag = "shelves"
)]
pub async fn update_shelf(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateShelfRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    if let Some(bins) = &payload.bins {
        for bin in bins {
            validate_input(bin)?;
        }
    }
    let shelf = state.services.shelves.update(id, &payload).await?;
    Ok(success_response("Shelf updated", shelf))
}

/// Delete a shelf and everything below it
#[utoipa::path(
    delete,
    path = "/api/v1/shelves/{id}",
    params(
        ("id" = i32, Path, description = "Shelf ID"),
        DeleteParams,
    ),
    responses(
        (status = 200, description = "Shelf deleted"),
        (status = 404, description = "Shelf not found"),
        (status = 409, description = "A bin below the shelf still holds stock"),
    ),
    tag = "shelves"
)]
pub async fn delete_shelf(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(params): Query<DeleteParams>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .shelves
        .delete(Some(id), params.parent_id, None)
        .await?;
    Ok(message_response("Shelf deleted"))
}

/// Add a bin to a shelf
#[utoipa::path(
    post,
    path = "/api/v1/shelves/{id}/bins",
    params(("id" = i32, Path, description = "Shelf ID")),
    request_body = CreateBinRequest,
    responses(
        (status = 201, description = "Bin created", body = ApiResponse<BinNode>),
        (status = 404, description = "Shelf not found"),
    ),
    tag = "bins"
)]
pub async fn create_bin(
    State(state): State<AppState>,
    Path(shelf_id): Path<i32>,
    Json(payload): Json<CreateBinRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    let bins = &state.services.bins;
    let id = bins.create(shelf_id, &payload, None).await?;
    Ok(created_response("Bin created", bins.get(id).await?))
}

/// List the bins of a shelf
#[utoipa::path(
    get,
    path = "/api/v1/shelves/{id}/bins",
    params(("id" = i32, Path, description = "Shelf ID")),
    responses(
        (status = 200, description = "Bins retrieved", body = ApiResponse<Vec<BinNode>>),
    ),
    tag = "bins"
)]
pub async fn list_bins(
    State(state): State<AppState>,
    Path(shelf_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let bins = state.services.bins.get_all(shelf_id).await?;
    let count = bins.len() as u64;
    Ok(list_response("Bins retrieved", bins, count))
}
