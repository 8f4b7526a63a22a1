#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request},
    Router,
};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use serde_json::Value;
use tower::ServiceExt;
use warehouse_locations_api::{
    app_router,
    config::AppConfig,
    db,
    dto::locations::{
        CreateAisleRequest, CreateBinRequest, CreateFloorRequest, CreateRoomRequest,
        CreateShelfRequest, CreateWarehouseRequest, WarehouseNode,
    },
    entities::{aisle, bin, floor, inventory_location, room, shelf, warehouse},
    AppState,
};

/// Helper harness for spinning up an application state backed by an in-memory SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );

        let pool = db::establish_in_memory()
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let state = AppState::new(Arc::new(pool), cfg);
        let router = app_router(state.clone());

        Self { router, state }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.state.db
    }

    /// Send a JSON request through the full router.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Creates the single-path tree W1/F1/R1/A1/S1/B1 with the given bin capacity.
    pub async fn seed_tree(&self, bin_capacity: i32) -> WarehouseNode {
        let warehouses = &self.state.services.warehouses;
        let id = warehouses
            .create(&single_path_tree(bin_capacity))
            .await
            .expect("seed warehouse tree");
        warehouses.get(id).await.expect("read seeded tree")
    }

    /// Registers an inventory record with the given stock.
    pub async fn seed_inventory(&self, name: &str, stock: i32) -> i32 {
        self.state
            .services
            .inventory
            .create(name, stock)
            .await
            .expect("seed inventory")
            .id
    }

    /// Row counts per level table, soft-deleted rows included.
    pub async fn row_counts(&self) -> [u64; 6] {
        let db = self.db();
        [
            warehouse::Entity::find().count(db).await.unwrap(),
            floor::Entity::find().count(db).await.unwrap(),
            room::Entity::find().count(db).await.unwrap(),
            aisle::Entity::find().count(db).await.unwrap(),
            shelf::Entity::find().count(db).await.unwrap(),
            bin::Entity::find().count(db).await.unwrap(),
        ]
    }

    pub async fn placement_count(&self) -> u64 {
        inventory_location::Entity::find()
            .count(self.db())
            .await
            .unwrap()
    }
}

/// Reads a response body as JSON.
pub async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    serde_json::from_slice(&bytes).expect("response body is json")
}

pub fn bin_request(name: &str, capacity: i32) -> CreateBinRequest {
    CreateBinRequest {
        name: name.to_string(),
        capacity,
    }
}

pub fn shelf_request(name: &str, bins: Vec<CreateBinRequest>) -> CreateShelfRequest {
    CreateShelfRequest {
        name: name.to_string(),
        bins,
    }
}

pub fn aisle_request(name: &str, shelves: Vec<CreateShelfRequest>) -> CreateAisleRequest {
    CreateAisleRequest {
        name: name.to_string(),
        shelves,
    }
}

pub fn room_request(name: &str, aisles: Vec<CreateAisleRequest>) -> CreateRoomRequest {
    CreateRoomRequest {
        name: name.to_string(),
        capacity: None,
        aisles,
    }
}

pub fn floor_request(name: &str, rooms: Vec<CreateRoomRequest>) -> CreateFloorRequest {
    CreateFloorRequest {
        name: name.to_string(),
        rooms,
    }
}

pub fn single_path_tree(bin_capacity: i32) -> CreateWarehouseRequest {
    CreateWarehouseRequest {
        name: "W1".to_string(),
        address: Some("1 Dock Road".to_string()),
        floors: vec![floor_request(
            "F1",
            vec![room_request(
                "R1",
                vec![aisle_request(
                    "A1",
                    vec![shelf_request("S1", vec![bin_request("B1", bin_capacity)])],
                )],
            )],
        )],
    }
}
