use super::common::{message_response, success_response, validate_input};
use crate::{
    dto::inventory_location::{InventoryLocationPath, PlaceInventoryRequest},
    errors::ApiError,
    handlers::AppState,
    ApiResponse,
};
use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use tracing::info;

/// Creates the router for inventory placement endpoints
pub fn inventory_location_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(place_inventory))
        .route("/:id", get(get_inventory_location).delete(remove_inventory_location))
        .route("/by-inventory/:inventory_id", get(get_location_by_inventory))
}

/// Place an inventory record into a bin
///
/// An inventory record that is already placed is moved to the new path.
#[utoipa::path(
    post,
    path = "/api/v1/inventory-locations",
    request_body = PlaceInventoryRequest,
    responses(
        (status = 200, description = "Inventory placed", body = ApiResponse<InventoryLocationPath>),
        (status = 400, description = "Path levels do not line up"),
        (status = 404, description = "Inventory or location level not found"),
        (status = 409, description = "Bin capacity exceeded"),
    ),
    tag = "inventory-locations"
)]
pub async fn place_inventory(
    State(state): State<AppState>,
    Json(payload): Json<PlaceInventoryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    let location = state.services.inventory_locations.place(&payload).await?;
    info!(
        inventory_id = payload.inventory_id,
        location_id = location.id,
        "Inventory placed via API"
    );
    Ok(success_response("Inventory placed", location))
}

#[utoipa::path(
    get,
    path = "/api/v1/inventory-locations/{id}",
    params(("id" = i32, Path, description = "Inventory location ID")),
    responses(
        (status = 200, description = "Inventory location retrieved", body = ApiResponse<InventoryLocationPath>),
        (status = 404, description = "Inventory location not found"),
    ),
    tag = "inventory-locations"
)]
pub async fn get_inventory_location(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let location = state.services.inventory_locations.get(id).await?;
    Ok(success_response("Inventory location retrieved", location))
}

#[utoipa::path(
    get,
    path = "/api/v1/inventory-locations/by-inventory/{inventory_id}",
    params(("inventory_id" = i32, Path, description = "Inventory ID")),
    responses(
        (status = 200, description = "Inventory location retrieved", body = ApiResponse<InventoryLocationPath>),
        (status = 404, description = "Inventory is not placed"),
    ),
    tag = "inventory-locations"
)]
pub async fn get_location_by_inventory(
    State(state): State<AppState>,
    Path(inventory_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let location = state
        .services
        .inventory_locations
        .get_by_inventory(inventory_id)
        .await?;
    Ok(success_response("Inventory location retrieved", location))
}

/// Remove a placement, freeing its bin
#[utoipa::path(
    delete,
    path = "/api/v1/inventory-locations/{id}",
    params(("id" = i32, Path, description = "Inventory location ID")),
    responses(
        (status = 200, description = "Inventory location removed"),
        (status = 404, description = "Inventory location not found"),
    ),
    tag = "inventory-locations"
)]
pub async fn remove_inventory_location(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.inventory_locations.remove(id).await?;
    Ok(message_response("Inventory location removed"))
}
