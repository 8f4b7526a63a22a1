mod common;

use common::{
    aisle_request, bin_request, floor_request, room_request, shelf_request, single_path_tree,
    TestApp,
};
use warehouse_locations_api::{
    dto::locations::{
        CreateWarehouseRequest, UpdateAisleRequest, UpdateFloorRequest, UpdateRoomRequest,
        UpdateWarehouseRequest,
    },
    errors::ServiceError,
    repositories::LevelStore,
};

#[tokio::test]
async fn nested_create_builds_the_full_six_level_tree() {
    let app = TestApp::new().await;
    let tree = app.seed_tree(10).await;

    assert_eq!(tree.name, "W1");
    assert_eq!(tree.floors.len(), 1);
    let floor = &tree.floors[0];
    assert_eq!(floor.name, "F1");
    assert_eq!(floor.warehouse_id, tree.id);
    let room = &floor.rooms[0];
    assert_eq!(room.name, "R1");
    let aisle = &room.aisles[0];
    assert_eq!(aisle.name, "A1");
    let shelf = &aisle.shelves[0];
    assert_eq!(shelf.name, "S1");

    assert_eq!(shelf.bins.len(), 1);
    let bin = &shelf.bins[0];
    assert_eq!(bin.name, "B1");
    assert_eq!(bin.capacity, 10);
    assert_eq!(bin.current_stock, 0);
    assert_eq!(bin.shelf_id, shelf.id);
}

#[tokio::test]
async fn failing_leaf_rolls_back_the_whole_tree() {
    let app = TestApp::new().await;

    // Two floors with two rooms each; the very last bin is invalid.
    let rooms = |last_capacity: i32| {
        vec![
            room_request(
                "R1",
                vec![aisle_request("A1", vec![shelf_request("S1", vec![bin_request("B1", 5)])])],
            ),
            room_request(
                "R2",
                vec![aisle_request(
                    "A2",
                    vec![shelf_request("S2", vec![bin_request("B2", last_capacity)])],
                )],
            ),
        ]
    };
    let request = CreateWarehouseRequest {
        name: "Broken".to_string(),
        address: None,
        floors: vec![floor_request("F1", rooms(5)), floor_request("F2", rooms(-1))],
    };

    let err = app
        .state
        .services
        .warehouses
        .create(&request)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::TransactionFailed {
            level: "Warehouse",
            ..
        }
    ));
    assert!(matches!(err.root_cause(), ServiceError::ValidationError(_)));
    assert_eq!(app.row_counts().await, [0, 0, 0, 0, 0, 0]);
}

#[tokio::test]
async fn reading_a_tree_twice_gives_the_same_result() {
    let app = TestApp::new().await;
    let warehouses = &app.state.services.warehouses;

    let request = CreateWarehouseRequest {
        name: "Twice".to_string(),
        address: None,
        floors: vec![
            floor_request("F1", vec![room_request("R1", vec![]), room_request("R2", vec![])]),
            floor_request(
                "F2",
                vec![room_request(
                    "R3",
                    vec![aisle_request(
                        "A1",
                        vec![shelf_request(
                            "S1",
                            vec![bin_request("B1", 3), bin_request("B2", 4)],
                        )],
                    )],
                )],
            ),
        ],
    };
    let id = warehouses.create(&request).await.unwrap();

    let first = warehouses.get(id).await.unwrap();
    let second = warehouses.get(id).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.floors.len(), 2);
    assert_eq!(first.floors[0].rooms.len(), 2);
}

#[tokio::test]
async fn warehouse_update_ignores_nested_floors() {
    let app = TestApp::new().await;
    let tree = app.seed_tree(10).await;
    let warehouses = &app.state.services.warehouses;

    let update = UpdateWarehouseRequest {
        name: Some("W1 renamed".to_string()),
        address: None,
        floors: Some(vec![floor_request("Never applied", vec![])]),
    };
    let updated = warehouses.update(tree.id, &update).await.unwrap();

    assert_eq!(updated.name, "W1 renamed");
    assert_eq!(updated.address.as_deref(), Some("1 Dock Road"));
    assert!(updated.updated_at.is_some());
    // the floor list is untouched
    assert_eq!(updated.floors, tree.floors);
}

#[tokio::test]
async fn listing_is_shallow_and_paginated() {
    let app = TestApp::new().await;
    let warehouses = &app.state.services.warehouses;

    for n in 0..3 {
        let mut request = single_path_tree(5);
        request.name = format!("W{}", n);
        request.floors.push(floor_request("Extra", vec![]));
        warehouses.create(&request).await.unwrap();
    }

    let (page_one, total) = warehouses.get_all(1, 2).await.unwrap();
    assert_eq!(total, 3);
    assert_eq!(page_one.len(), 2);
    assert!(page_one.iter().all(|w| w.floor_count == 2));

    let (page_two, _) = warehouses.get_all(2, 2).await.unwrap();
    assert_eq!(page_two.len(), 1);
    assert_eq!(page_two[0].name, "W2");
}

#[tokio::test]
async fn deleting_a_warehouse_cascades_through_every_level() {
    let app = TestApp::new().await;
    let tree = app.seed_tree(10).await;
    let services = &app.state.services;

    services.warehouses.delete(tree.id).await.unwrap();

    let shelf = &tree.floors[0].rooms[0].aisles[0].shelves[0];
    assert!(matches!(
        services.warehouses.get(tree.id).await,
        Err(ServiceError::NotFound(_))
    ));
    assert!(matches!(
        services.floors.get(tree.floors[0].id).await,
        Err(ServiceError::NotFound(_))
    ));
    assert!(matches!(
        services.bins.get(shelf.bins[0].id).await,
        Err(ServiceError::NotFound(_))
    ));

    // soft delete keeps the rows
    assert_eq!(app.row_counts().await, [1, 1, 1, 1, 1, 1]);
    let (listed, total) = services.warehouses.get_all(1, 20).await.unwrap();
    assert!(listed.is_empty());
    assert_eq!(total, 0);
}

#[tokio::test]
async fn children_cannot_be_created_under_deleted_parents() {
    let app = TestApp::new().await;
    let tree = app.seed_tree(10).await;
    let services = &app.state.services;

    services.warehouses.delete(tree.id).await.unwrap();

    let err = services
        .floors
        .create(tree.id, &floor_request("Late", vec![]), None)
        .await
        .unwrap_err();
    assert!(matches!(err.root_cause(), ServiceError::NotFound(msg) if msg.contains("Warehouse")));
}

#[tokio::test]
async fn intermediate_levels_update_their_own_fields() {
    let app = TestApp::new().await;
    let tree = app.seed_tree(10).await;
    let services = &app.state.services;
    let floor = &tree.floors[0];
    let room = &floor.rooms[0];
    let aisle = &room.aisles[0];

    let updated_floor = services
        .floors
        .update(
            floor.id,
            &UpdateFloorRequest {
                name: Some("Mezzanine".to_string()),
                rooms: Some(vec![room_request("Ignored", vec![])]),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated_floor.name, "Mezzanine");
    assert_eq!(updated_floor.rooms, floor.rooms);

    let updated_room = services
        .rooms
        .update(
            room.id,
            &UpdateRoomRequest {
                name: None,
                capacity: Some(120),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated_room.name, "R1");
    assert_eq!(updated_room.capacity, Some(120));

    let err = services
        .rooms
        .update(
            room.id,
            &UpdateRoomRequest {
                name: None,
                capacity: Some(-5),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::ValidationError(_)));

    let updated_aisle = services
        .aisles
        .update(
            aisle.id,
            &UpdateAisleRequest {
                name: Some("A1-north".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated_aisle.name, "A1-north");
    assert_eq!(updated_aisle.shelves, aisle.shelves);

    assert!(matches!(
        services
            .aisles
            .update(9_999, &UpdateAisleRequest::default())
            .await,
        Err(ServiceError::NotFound(_))
    ));
}
