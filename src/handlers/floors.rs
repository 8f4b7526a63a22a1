use super::common::{
    created_response, list_response, message_response, success_response, validate_input,
    DeleteParams,
};
use crate::{
    dto::locations::{CreateRoomRequest, FloorNode, RoomNode, UpdateFloorRequest},
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

/// Creates the router for floor endpoints
pub fn floor_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/floors/:id",
            get(get_floor).put(update_floor).delete(delete_floor),
        )
        .route("/floors/:id/rooms", get(list_rooms).post(create_room))
}

/// Get a floor with its subtree
#[utoipa::path(
    get,
    path = "/api/v1/floors/{id}",
    params(("id" = i32, Path, description = "Floor ID")),
    responses(
        (status = 200, description = "Floor retrieved", body = ApiResponse<FloorNode>),
        (status = 404, description = "Floor not found"),
    ),
    tag = "floors"
)]
pub async fn get_floor(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let floor = state.services.floors.get(id).await?;
    Ok(success_response("Floor retrieved", floor))
}

/// Rename a floor (nested rooms are not applied)
#[utoipa::path(
    put,
    path = "/api/v1/floors/{id}",
    params(("id" = i32, Path, description = "Floor ID")),
    request_body = UpdateFloorRequest,
    responses(
        (status = 200, description = "Floor updated", body = ApiResponse<FloorNode>),
        (status = 404, description = "Floor not found"),
    ),
    tag = "floors"
)]
pub async fn update_floor(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateFloorRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    let floor = state.services.floors.update(id, &payload).await?;
    Ok(success_response("Floor updated", floor))
}

/// Delete a floor and everything below it
#[utoipa::path(
    delete,
    path = "/api/v1/floors/{id}",
    params(
        ("id" = i32, Path, description = "Floor ID"),
        DeleteParams,
    ),
    responses(
        (status = 200, description = "Floor deleted"),
        (status = 404, description = "Floor not found"),
        (status = 409, description = "A bin below the floor still holds stock"),
    ),
    tag = "floors"
)]
pub async fn delete_floor(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(params): Query<DeleteParams>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .floors
        .delete(Some(id), params.parent_id, None)
        .await?;
    Ok(message_response("Floor deleted"))
}

/// Add a room to a floor
#[utoipa::path(
    post,
    path = "/api/v1/floors/{id}/rooms",
    params(("id" = i32, Path, description = "Floor ID")),
    request_body = CreateRoomRequest,
    responses(
        (status = 201, description = "Room created", body = ApiResponse<RoomNode>),
        (status = 404, description = "Floor not found"),
    ),
    tag = "rooms"
)]
pub async fn create_room(
    State(state): State<AppState>,
    Path(floor_id): Path<i32>,
    Json(payload): Json<CreateRoomRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    let rooms = &state.services.rooms;
    let id = rooms.create(floor_id, &payload, None).await?;
    Ok(created_response("Room created", rooms.get(id).await?))
}

/// List the rooms of a floor
#[utoipa::path(
    get,
    path = "/api/v1/floors/{id}/rooms",
    params(("id" = i32, Path, description = "Floor ID")),
    responses(
        (status = 200, description = "Rooms retrieved", body = ApiResponse<Vec<RoomNode>>),
    ),
    tag = "rooms"
)]
pub async fn list_rooms(
    State(state): State<AppState>,
    Path(floor_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let rooms = state.services.rooms.get_all(floor_id).await?;
    let count = rooms.len() as u64;
    Ok(list_response("Rooms retrieved", rooms, count))
}
