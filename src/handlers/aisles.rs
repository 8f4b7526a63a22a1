use super::common::{
    created_response, list_response, message_response, success_response, validate_input,
    DeleteParams,
};
use crate::{
    dto::locations::{AisleNode, CreateShelfRequest, ShelfNode, UpdateAisleRequest},
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

/// Creates the router for aisle endpoints
pub fn aisle_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/aisles/:id",
            get(get_aisle).put(update_aisle).delete(delete_aisle),
        )
        .route("/aisles/:id/shelves", get(list_shelves).post(create_shelf))
}

/// Get a aisle with its subtree
#[utoipa::path(
    get,
    path = "/api/v1/aisles/{id}",
    params(("id" = i32, Path, description = "Aisle ID")),
    responses(
        (status = 200, description = "Aisle retrieved", body = ApiResponse<AisleNode>),
        (status = 404, description = "Aisle not found"),
    ),
    tag = "aisles"
)]
pub async fn get_aisle(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let aisle = state.services.aisles.get(id).await?;
    Ok(success_response("Aisle retrieved", aisle))
}

/// Rename an aisle
#[utoipa::path(
    put,
    path = "/api/v1/aisles/{id}",
    params(("id" = i32, Path, description = "Aisle ID")),
    request_body = UpdateAisleRequest,
    responses(
        (status = 200, description = "Aisle updated", body = ApiResponse<AisleNode>),
        (status = 404, description = "Aisle not found"),
    ),
    tag = "aisles"
)]
pub async fn update_aisle(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateAisleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    let aisle = state.services.aisles.update(id, &payload).await?;
    Ok(success_response("Aisle updated", aisle))
}

/// Delete a aisle and everything below it
#[utoipa::path(
    delete,
    path = "/api/v1/aisles/{id}",
    params(
        ("id" = i32, Path, description = "Aisle ID"),
        DeleteParams,
    ),
    responses(
        (status = 200, description = "Aisle deleted"),
        (status = 404, description = "Aisle not found"),
        (status = 409, description = "A bin below the aisle still holds stock"),
    ),
    tag = "aisles"
)]
pub async fn delete_aisle(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(params): Query<DeleteParams>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .aisles
        .delete(Some(id), params.parent_id, None)
        .await?;
    Ok(message_response("Aisle deleted"))
}

/// Add a shelf to a aisle
#[utoipa::path(
    post,
    path = "/api/v1/aisles/{id}/shelves",
    params(("id" = i32, Path, description = "Aisle ID")),
    request_body = CreateShelfRequest,
    responses(
        (status = 201, description = "Shelf created", body = ApiResponse<ShelfNode>),
        (status = 404, description = "Aisle not found"),
    ),
    tag = "shelves"
)]
pub async fn create_shelf(
    State(state): State<AppState>,
    Path(aisle_id): Path<i32>,
    Json(payload): Json<CreateShelfRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    let shelves = &state.services.shelves;
    let id = shelves.create(aisle_id, &payload, None).await?;
    Ok(created_response("Shelf created", shelves.get(id).await?))
}

/// List the shelves of a aisle
#[utoipa::path(
    get,
    path = "/api/v1/aisles/{id}/shelves",
    params(("id" = i32, Path, description = "Aisle ID")),
    responses(
        (status = 200, description = "Shelves retrieved", body = ApiResponse<Vec<ShelfNode>>),
    ),
    tag = "shelves"
)]
pub async fn list_shelves(
    State(state): State<AppState>,
    Path(aisle_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let shelves = state.services.shelves.get_all(aisle_id).await?;
    let count = shelves.len() as u64;
    Ok(list_response("Shelves retrieved", shelves, count))
}
