use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Full path an inventory record should be placed at.
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct PlaceInventoryRequest {
    #[validate(range(min = 1))]
    pub inventory_id: i32,
    #[validate(range(min = 1))]
    pub warehouse_id: i32,
    #[validate(range(min = 1))]
    pub floor_id: i32,
    #[validate(range(min = 1))]
    pub room_id: i32,
    #[validate(range(min = 1))]
    pub aisle_id: i32,
    #[validate(range(min = 1))]
    pub shelf_id: i32,
    #[validate(range(min = 1))]
    pub bin_id: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PathSegment {
    pub id: i32,
    pub name: String,
}

/// Placement with names resolved at every level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InventoryLocationPath {
    pub id: i32,
    pub inventory_id: i32,
    pub warehouse: PathSegment,
    pub floor: PathSegment,
    pub room: PathSegment,
    pub aisle: PathSegment,
    pub shelf: PathSegment,
    pub bin: PathSegment,
    pub placed_at: DateTime<Utc>,
}
