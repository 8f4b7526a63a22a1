use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Warehouse Locations API",
        version = "1.0.0",
        description = r#"
# Warehouse Locations API

Manages the physical location hierarchy of warehouses
(warehouse, floor, room, aisle, shelf, bin) and the placement of inventory
records into bins.

## Responses

Every endpoint answers with the same envelope:

```json
{
  "statusCode": 200,
  "isSuccess": true,
  "message": "Warehouse retrieved",
  "result": { },
  "itemCount": 1
}
```

`itemCount` is only present on list endpoints. Failures carry
`isSuccess: false`, the error text in `message` and a null `result`.
"#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "warehouses", description = "Warehouse aggregate endpoints"),
        (name = "floors", description = "Floor endpoints"),
        (name = "rooms", description = "Room endpoints"),
        (name = "aisles", description = "Aisle endpoints"),
        (name = "shelves", description = "Shelf endpoints, including bin reconciliation"),
        (name = "bins", description = "Bin endpoints"),
        (name = "inventory-locations", description = "Inventory placement endpoints")
    ),
    paths(
        // Warehouses
        crate::handlers::warehouses::create_warehouse,
        crate::handlers::warehouses::list_warehouses,
        crate::handlers::warehouses::get_warehouse,
        crate::handlers::warehouses::update_warehouse,
        crate::handlers::warehouses::delete_warehouse,
        crate::handlers::warehouses::create_floor,
        crate::handlers::warehouses::list_floors,
        // Floors
        crate::handlers::floors::get_floor,
        crate::handlers::floors::update_floor,
        crate::handlers::floors::delete_floor,
        crate::handlers::floors::create_room,
        crate::handlers::floors::list_rooms,
        // Rooms
        crate::handlers::rooms::get_room,
        crate::handlers::rooms::update_room,
        crate::handlers::rooms::delete_room,
        crate::handlers::rooms::create_aisle,
        crate::handlers::rooms::list_aisles,
        // Aisles
        crate::handlers::aisles::get_aisle,
        crate::handlers::aisles::update_aisle,
        crate::handlers::aisles::delete_aisle,
        crate::handlers::aisles::create_shelf,
        crate::handlers::aisles::list_shelves,
        // Shelves
        crate::handlers::shelves::get_shelf,
        crate::handlers::shelves::update_shelf,
        crate::handlers::shelves::delete_shelf,
        crate::handlers::shelves::create_bin,
        crate::handlers::shelves::list_bins,
        // Bins
        crate::handlers::bins::get_bin,
        crate::handlers::bins::update_bin,
        crate::handlers::bins::delete_bin,
        crate::handlers::bins::get_bin_occupancy,
        // Inventory placement
        crate::handlers::inventory_locations::place_inventory,
        crate::handlers::inventory_locations::get_inventory_location,
        crate::handlers::inventory_locations::get_location_by_inventory,
        crate::handlers::inventory_locations::remove_inventory_location,
    ),
    components(
        schemas(
            crate::dto::locations::CreateWarehouseRequest,
            crate::dto::locations::CreateFloorRequest,
            crate::dto::locations::CreateRoomRequest,
            crate::dto::locations::CreateAisleRequest,
            crate::dto::locations::CreateShelfRequest,
            crate::dto::locations::CreateBinRequest,
            crate::dto::locations::UpdateWarehouseRequest,
            crate::dto::locations::UpdateFloorRequest,
            crate::dto::locations::UpdateRoomRequest,
            crate::dto::locations::UpdateAisleRequest,
            crate::dto::locations::UpdateShelfRequest,
            crate::dto::locations::ShelfBinInput,
            crate::dto::locations::UpdateBinRequest,
            crate::dto::locations::WarehouseNode,
            crate::dto::locations::FloorNode,
            crate::dto::locations::RoomNode,
            crate::dto::locations::AisleNode,
            crate::dto::locations::ShelfNode,
            crate::dto::locations::BinNode,
            crate::dto::locations::WarehouseSummary,
            crate::dto::locations::BinOccupancy,
            crate::dto::inventory_location::PlaceInventoryRequest,
            crate::dto::inventory_location::PathSegment,
            crate::dto::inventory_location::InventoryLocationPath,
        )
    )
)]
pub struct ApiDocV1;

/// Serves the generated OpenAPI document.
pub fn docs_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route(
        "/api-docs/openapi.json",
        get(|| async { Json(ApiDocV1::openapi()) }),
    )
}
