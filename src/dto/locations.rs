//! Request and response shapes for the location hierarchy.
//!
//! Create requests nest all the way down so a whole warehouse tree can be
//! submitted in one call. Response nodes mirror that nesting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateWarehouseRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(max = 500))]
    pub address: Option<String>,
    #[serde(default)]
    #[validate]
    pub floors: Vec<CreateFloorRequest>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateFloorRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    #[validate]
    pub rooms: Vec<CreateRoomRequest>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateRoomRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(range(min = 0))]
    pub capacity: Option<i32>,
    #[serde(default)]
    #[validate]
    pub aisles: Vec<CreateAisleRequest>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateAisleRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    #[validate]
    pub shelves: Vec<CreateShelfRequest>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateShelfRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    #[validate]
    pub bins: Vec<CreateBinRequest>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateBinRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(range(min = 0))]
    pub capacity: i32,
}

/// Warehouse updates touch scalar fields only.
///
/// `floors` is accepted so clients can send back what they read, but it is not
/// applied; floors are managed through their own endpoints.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
pub struct UpdateWarehouseRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(max = 500))]
    pub address: Option<String>,
    pub floors: Option<Vec<CreateFloorRequest>>,
}

/// Like warehouses, nested rooms on a floor update are ignored.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
pub struct UpdateFloorRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub rooms: Option<Vec<CreateRoomRequest>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
pub struct UpdateRoomRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(range(min = 0))]
    pub capacity: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
pub struct UpdateAisleRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
}

/// Shelf update. When `bins` is present the shelf's bins are reconciled
/// against it: listed ids are updated, entries without an id are created and
/// live bins missing from the list are deleted.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
pub struct UpdateShelfRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub bins: Option<Vec<ShelfBinInput>>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct ShelfBinInput {
    pub id: Option<i32>,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(range(min = 0))]
    pub capacity: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
pub struct UpdateBinRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(range(min = 0))]
    pub capacity: Option<i32>,
    /// Moves the bin to another shelf.
    pub shelf_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WarehouseNode {
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub floors: Vec<FloorNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FloorNode {
    pub id: i32,
    pub name: String,
    pub warehouse_id: i32,
    pub rooms: Vec<RoomNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RoomNode {
    pub id: i32,
    pub name: String,
    pub capacity: Option<i32>,
    pub floor_id: i32,
    pub aisles: Vec<AisleNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AisleNode {
    pub id: i32,
    pub name: String,
    pub room_id: i32,
    pub shelves: Vec<ShelfNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ShelfNode {
    pub id: i32,
    pub name: String,
    pub aisle_id: i32,
    pub bins: Vec<BinNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BinNode {
    pub id: i32,
    pub name: String,
    pub capacity: i32,
    pub shelf_id: i32,
    /// Sum of the stock of every inventory record placed in this bin.
    pub current_stock: i64,
}

/// Row of the shallow warehouse listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WarehouseSummary {
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
    pub floor_count: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BinOccupancy {
    pub bin_id: i32,
    pub capacity: i32,
    pub current_stock: i64,
    pub available: i64,
}
