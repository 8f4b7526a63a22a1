use super::common::{
    created_response, list_response, message_response, success_response, validate_input,
    PaginationParams,
};
use crate::{
    dto::locations::{
        CreateFloorRequest, CreateWarehouseRequest, FloorNode, UpdateWarehouseRequest,
        WarehouseNode, WarehouseSummary,
    },
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
use tracing::info;

/// Creates the router for warehouse endpoints
pub fn warehouse_routes() -> Router<AppState> {
    Router::new()
        .route("/warehouses", get(list_warehouses).post(create_warehouse))
        .route(
            "/warehouses/:id",
            get(get_warehouse)
                .put(update_warehouse)
                .delete(delete_warehouse),
        )
        .route(
            "/warehouses/:id/floors",
            get(list_floors).post(create_floor),
        )
}

/// Create a warehouse, optionally with its whole floor tree
#[utoipa::path(
    post,
    path = "/api/v1/warehouses",
    request_body = CreateWarehouseRequest,
    responses(
        (status = 201, description = "Warehouse created", body = ApiResponse<WarehouseNode>),
        (status = 400, description = "Invalid request data"),
        (status = 404, description = "Parent level not found"),
    ),
    tag = "warehouses"
)]
pub async fn create_warehouse(
    State(state): State<AppState>,
    Json(payload): Json<CreateWarehouseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    let id = state.services.warehouses.create(&payload).await?;
    let warehouse = state.services.warehouses.get(id).await?;
    info!(warehouse_id = id, "Warehouse created via API");
    Ok(created_response("Warehouse created", warehouse))
}

/// List warehouses with floor counts
#[utoipa::path(
    get,
    path = "/api/v1/warehouses",
    params(PaginationParams),
    responses(
        (status = 200, description = "Warehouses retrieved", body = ApiResponse<Vec<WarehouseSummary>>),
    ),
    tag = "warehouses"
)]
pub async fn list_warehouses(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, ApiError> {
    let per_page = state.config.page_size(params.per_page);
    let (warehouses, total) = state
        .services
        .warehouses
        .get_all(params.page(), per_page)
        .await?;
    Ok(list_response("Warehouses retrieved", warehouses, total))
}

/// Get a warehouse with its full location tree
#[utoipa::path(
    get,
    path = "/api/v1/warehouses/{id}",
    params(("id" = i32, Path, description = "Warehouse ID")),
    responses(
        (status = 200, description = "Warehouse retrieved", body = ApiResponse<WarehouseNode>),
        (status = 404, description = "Warehouse not found"),
    ),
    tag = "warehouses"
)]
pub async fn get_warehouse(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let warehouse = state.services.warehouses.get(id).await?;
    Ok(success_response("Warehouse retrieved", warehouse))
}

/// Update warehouse name and address
#[utoipa::path(
    put,
    path = "/api/v1/warehouses/{id}",
    params(("id" = i32, Path, description = "Warehouse ID")),
    request_body = UpdateWarehouseRequest,
    responses(
        (status = 200, description = "Warehouse updated", body = ApiResponse<WarehouseNode>),
        (status = 404, description = "Warehouse not found"),
    ),
    tag = "warehouses"
)]
pub async fn update_warehouse(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateWarehouseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    let warehouse = state.services.warehouses.update(id, &payload).await?;
    Ok(success_response("Warehouse updated", warehouse))
}

/// Delete a warehouse and everything in it
#[utoipa::path(
    delete,
    path = "/api/v1/warehouses/{id}",
    params(("id" = i32, Path, description = "Warehouse ID")),
    responses(
        (status = 200, description = "Warehouse deleted"),
        (status = 404, description = "Warehouse not found"),
        (status = 409, description = "A bin in the warehouse still holds stock"),
    ),
    tag = "warehouses"
)]
pub async fn delete_warehouse(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.warehouses.delete(id).await?;
    Ok(message_response("Warehouse deleted"))
}

/// Add a floor, with nested rooms, to a warehouse
#[utoipa::path(
    post,
    path = "/api/v1/warehouses/{id}/floors",
    params(("id" = i32, Path, description = "Warehouse ID")),
    request_body = CreateFloorRequest,
    responses(
        (status = 201, description = "Floor created", body = ApiResponse<FloorNode>),
        (status = 404, description = "Warehouse not found"),
    ),
    tag = "floors"
)]
pub async fn create_floor(
    State(state): State<AppState>,
    Path(warehouse_id): Path<i32>,
    Json(payload): Json<CreateFloorRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    let floors = &state.services.floors;
    let id = floors.create(warehouse_id, &payload, None).await?;
    Ok(created_response("Floor created", floors.get(id).await?))
}

/// List the floors of a warehouse
#[utoipa::path(
    get,
    path = "/api/v1/warehouses/{id}/floors",
    params(("id" = i32, Path, description = "Warehouse ID")),
    responses(
        (status = 200, description = "Floors retrieved", body = ApiResponse<Vec<FloorNode>>),
    ),
    tag = "floors"
)]
pub async fn list_floors(
    State(state): State<AppState>,
    Path(warehouse_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let floors = state.services.floors.get_all(warehouse_id).await?;
    let count = floors.len() as u64;
    Ok(list_response("Floors retrieved", floors, count))
}
