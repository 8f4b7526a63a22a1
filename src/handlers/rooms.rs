use super::common::{
    created_response, list_response, message_response, success_response, validate_input,
    DeleteParams,
};
use crate::{
    dto::locations::{AisleNode, CreateAisleRequest, RoomNode, UpdateRoomRequest},
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

/// Creates the router for room endpoints
pub fn room_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/rooms/:id",
            get(get_room).put(update_room).delete(delete_room),
        )
        .route("/rooms/:id/aisles", get(list_aisles).post(create_aisle))
}

/// Get a room with its subtree
#[utoipa::path(
    get,
    path = "/api/v1/rooms/{id}",
    params(("id" = i32, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Room retrieved", body = ApiResponse<RoomNode>),
        (status = 404, description = "Room not found"),
    ),
    tag = "rooms"
)]
pub async fn get_room(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let room = state.services.rooms.get(id).await?;
    Ok(success_response("Room retrieved", room))
}

/// Update room name and capacity
#[utoipa::path(
    put,
    path = "/api/v1/rooms/{id}",
    params(("id" = i32, Path, description = "Room ID")),
    request_body = UpdateRoomRequest,
    responses(
        (status = 200, description = "Room updated", body = ApiResponse<RoomNode>),
        (status = 404, description = "Room not found"),
    ),
    tag = "rooms"
)]
pub async fn update_room(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateRoomRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    let room = state.services.rooms.update(id, &payload).await?;
    Ok(success_response("Room updated", room))
}

/// Delete a room and everything below it
#[utoipa::path(
    delete,
    path = "/api/v1/rooms/{id}",
    params(
        ("id" = i32, Path, description = "Room ID"),
        DeleteParams,
    ),
    responses(
        (status = 200, description = "Room deleted"),
        (status = 404, description = "Room not found"),
        (status = 409, description = "A bin below the room still holds stock"),
    ),
    tag = "rooms"
)]
pub async fn delete_room(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(params): Query<DeleteParams>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .rooms
        .delete(Some(id), params.parent_id, None)
        .await?;
    Ok(message_response("Room deleted"))
}

/// Add a aisle to a room
#[utoipa::path(
    post,
    path = "/api/v1/rooms/{id}/aisles",
    params(("id" = i32, Path, description = "Room ID")),
    request_body = CreateAisleRequest,
    responses(
        (status = 201, description = "Aisle created", body = ApiResponse<AisleNode>),
        (status = 404, description = "Room not found"),
    ),
    tag = "aisles"
)]
pub async fn create_aisle(
    State(state): State<AppState>,
    Path(room_id): Path<i32>,
    Json(payload): Json<CreateAisleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    let aisles = &state.services.aisles;
    let id = aisles.create(room_id, &payload, None).await?;
    Ok(created_response("Aisle created", aisles.get(id).await?))
}

/// List the aisles of a room
#[utoipa::path(
    get,
    path = "/api/v1/rooms/{id}/aisles",
    params(("id" = i32, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Aisles retrieved", body = ApiResponse<Vec<AisleNode>>),
    ),
    tag = "aisles"
)]
pub async fn list_aisles(
    State(state): State<AppState>,
    Path(room_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let aisles = state.services.aisles.get_all(room_id).await?;
    let count = aisles.len() as u64;
    Ok(list_response("Aisles retrieved", aisles, count))
}
