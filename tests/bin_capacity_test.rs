mod common;

use axum::http::StatusCode;
use common::{bin_request, TestApp};
use rstest::rstest;
use warehouse_locations_api::{
    dto::{
        inventory_location::PlaceInventoryRequest,
        locations::{UpdateBinRequest, WarehouseNode},
    },
    errors::ServiceError,
    repositories::LevelStore,
};

fn place_request(tree: &WarehouseNode, inventory_id: i32, bin_index: usize) -> PlaceInventoryRequest {
    let floor = &tree.floors[0];
    let room = &floor.rooms[0];
    let aisle = &room.aisles[0];
    let shelf = &aisle.shelves[0];
    PlaceInventoryRequest {
        inventory_id,
        warehouse_id: tree.id,
        floor_id: floor.id,
        room_id: room.id,
        aisle_id: aisle.id,
        shelf_id: shelf.id,
        bin_id: shelf.bins[bin_index].id,
    }
}

fn bin_id(tree: &WarehouseNode) -> i32 {
    tree.floors[0].rooms[0].aisles[0].shelves[0].bins[0].id
}

#[rstest]
#[case::over_capacity(50, false)]
#[case::under_capacity(30, true)]
#[case::exactly_full(40, true)]
#[tokio::test]
async fn placement_respects_bin_capacity(#[case] stock: i32, #[case] fits: bool) {
    let app = TestApp::new().await;
    let tree = app.seed_tree(40).await;
    let inventory_id = app.seed_inventory("Widgets", stock).await;
    let services = &app.state.services;

    let result = services
        .inventory_locations
        .place(&place_request(&tree, inventory_id, 0))
        .await;

    if fits {
        let path = result.unwrap();
        assert_eq!(path.inventory_id, inventory_id);
        assert_eq!(path.bin.name, "B1");
        assert_eq!(app.placement_count().await, 1);
        let bin = services.bins.get(bin_id(&tree)).await.unwrap();
        assert_eq!(bin.current_stock, i64::from(stock));
    } else {
        assert!(matches!(result, Err(ServiceError::Conflict(_))));
        assert_eq!(app.placement_count().await, 0);
    }
}

#[tokio::test]
async fn other_placements_count_against_capacity() {
    let app = TestApp::new().await;
    let tree = app.seed_tree(40).await;
    let assigner = &app.state.services.inventory_locations;

    let first = app.seed_inventory("Bolts", 25).await;
    let second = app.seed_inventory("Nuts", 20).await;
    let third = app.seed_inventory("Washers", 15).await;

    assigner.place(&place_request(&tree, first, 0)).await.unwrap();
    assert!(matches!(
        assigner.place(&place_request(&tree, second, 0)).await,
        Err(ServiceError::Conflict(_))
    ));
    assigner.place(&place_request(&tree, third, 0)).await.unwrap();

    let occupancy = app.state.services.bins.occupancy(bin_id(&tree)).await.unwrap();
    assert_eq!(occupancy.capacity, 40);
    assert_eq!(occupancy.current_stock, 40);
    assert_eq!(occupancy.available, 0);
}

#[tokio::test]
async fn occupied_bin_cannot_be_deleted_until_emptied() {
    let app = TestApp::new().await;
    let tree = app.seed_tree(40).await;
    let services = &app.state.services;
    let bin = bin_id(&tree);

    let inventory_id = app.seed_inventory("Crates", 10).await;
    let location = services
        .inventory_locations
        .place(&place_request(&tree, inventory_id, 0))
        .await
        .unwrap();

    let err = services.bins.delete(Some(bin), None, None).await.unwrap_err();
    assert!(matches!(err, ServiceError::TransactionFailed { level: "Bin", .. }));
    assert!(matches!(err.root_cause(), ServiceError::Conflict(msg) if msg.contains("bin still contains items")));
    assert!(services.bins.get(bin).await.is_ok());

    services.inventory_locations.remove(location.id).await.unwrap();
    assert_eq!(app.placement_count().await, 0);

    assert_eq!(services.bins.delete(Some(bin), None, None).await.unwrap(), 1);
    assert!(matches!(
        services.bins.get(bin).await,
        Err(ServiceError::NotFound(_))
    ));
}

#[tokio::test]
async fn occupied_bin_blocks_the_shelf_cascade() {
    let app = TestApp::new().await;
    let tree = app.seed_tree(40).await;
    let services = &app.state.services;
    let shelf_id = tree.floors[0].rooms[0].aisles[0].shelves[0].id;

    let inventory_id = app.seed_inventory("Pallets", 5).await;
    services
        .inventory_locations
        .place(&place_request(&tree, inventory_id, 0))
        .await
        .unwrap();

    let err = services
        .shelves
        .delete(Some(shelf_id), None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::TransactionFailed { level: "Shelf", .. }));
    assert_eq!(err.status_code(), StatusCode::CONFLICT);

    // nothing was marked
    let shelf = services.shelves.get(shelf_id).await.unwrap();
    assert_eq!(shelf.bins.len(), 1);
}

#[tokio::test]
async fn capacity_cannot_drop_below_occupancy() {
    let app = TestApp::new().await;
    let tree = app.seed_tree(40).await;
    let services = &app.state.services;
    let bin = bin_id(&tree);

    let inventory_id = app.seed_inventory("Boxes", 30).await;
    services
        .inventory_locations
        .place(&place_request(&tree, inventory_id, 0))
        .await
        .unwrap();

    let shrink = UpdateBinRequest {
        capacity: Some(20),
        ..Default::default()
    };
    let err = services.bins.update(bin, &shrink).await.unwrap_err();
    assert!(matches!(err.root_cause(), ServiceError::Conflict(_)));
    assert_eq!(services.bins.capacity(bin).await.unwrap(), 40);

    let exact = UpdateBinRequest {
        name: Some("B1 tight".to_string()),
        capacity: Some(30),
        shelf_id: None,
    };
    let updated = services.bins.update(bin, &exact).await.unwrap();
    assert_eq!(updated.capacity, 30);
    assert_eq!(updated.name, "B1 tight");
    assert_eq!(updated.current_stock, 30);
}

#[tokio::test]
async fn bins_can_move_to_another_live_shelf() {
    let app = TestApp::new().await;
    let tree = app.seed_tree(40).await;
    let services = &app.state.services;
    let aisle_id = tree.floors[0].rooms[0].aisles[0].id;
    let bin = bin_id(&tree);

    let target = services
        .shelves
        .create(aisle_id, &common::shelf_request("S2", vec![]), None)
        .await
        .unwrap();

    let moved = services
        .bins
        .update(
            bin,
            &UpdateBinRequest {
                shelf_id: Some(target),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(moved.shelf_id, target);
    assert_eq!(services.shelves.get(target).await.unwrap().bins.len(), 1);

    let err = services
        .bins
        .update(
            bin,
            &UpdateBinRequest {
                shelf_id: Some(9_999),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err.root_cause(), ServiceError::NotFound(msg) if msg.contains("Shelf")));
}

#[tokio::test]
async fn moving_a_bin_carries_its_placements_along() {
    let app = TestApp::new().await;
    let tree = app.seed_tree(40).await;
    let services = &app.state.services;
    let room_id = tree.floors[0].rooms[0].id;
    let old_shelf = tree.floors[0].rooms[0].aisles[0].shelves[0].id;
    let bin = bin_id(&tree);

    let inventory_id = app.seed_inventory("Brackets", 10).await;
    services
        .inventory_locations
        .place(&place_request(&tree, inventory_id, 0))
        .await
        .unwrap();

    let new_aisle = services
        .aisles
        .create(
            room_id,
            &common::aisle_request("A2", vec![common::shelf_request("S2", vec![])]),
            None,
        )
        .await
        .unwrap();
    let new_shelf = services.aisles.get(new_aisle).await.unwrap().shelves[0].id;

    services
        .bins
        .update(
            bin,
            &UpdateBinRequest {
                shelf_id: Some(new_shelf),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let path = services
        .inventory_locations
        .get_by_inventory(inventory_id)
        .await
        .unwrap();
    assert_eq!(path.bin.id, bin);
    assert_eq!(path.shelf.id, new_shelf);
    assert_eq!(path.shelf.name, "S2");
    assert_eq!(path.aisle.id, new_aisle);
    assert_eq!(path.aisle.name, "A2");
    assert_eq!(path.room.id, room_id);
    assert_eq!(path.warehouse.id, tree.id);

    // the old shelf is empty now and can go; the new one is guarded
    services
        .shelves
        .delete(Some(old_shelf), None, None)
        .await
        .unwrap();
    let err = services
        .shelves
        .delete(Some(new_shelf), None, None)
        .await
        .unwrap_err();
    assert!(matches!(err.root_cause(), ServiceError::Conflict(_)));
    assert_eq!(
        services
            .inventory_locations
            .get_by_inventory(inventory_id)
            .await
            .unwrap()
            .shelf
            .id,
        new_shelf
    );
}

#[tokio::test]
async fn failed_move_leaves_placements_untouched() {
    let app = TestApp::new().await;
    let tree = app.seed_tree(40).await;
    let services = &app.state.services;
    let aisle_id = tree.floors[0].rooms[0].aisles[0].id;
    let old_shelf = tree.floors[0].rooms[0].aisles[0].shelves[0].id;
    let bin = bin_id(&tree);

    let inventory_id = app.seed_inventory("Hinges", 30).await;
    services
        .inventory_locations
        .place(&place_request(&tree, inventory_id, 0))
        .await
        .unwrap();
    let target = services
        .shelves
        .create(aisle_id, &common::shelf_request("S2", vec![]), None)
        .await
        .unwrap();

    // the move is rejected by the capacity check in the same transaction
    let err = services
        .bins
        .update(
            bin,
            &UpdateBinRequest {
                capacity: Some(5),
                shelf_id: Some(target),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err.root_cause(), ServiceError::Conflict(_)));

    let path = services
        .inventory_locations
        .get_by_inventory(inventory_id)
        .await
        .unwrap();
    assert_eq!(path.shelf.id, old_shelf);
    assert_eq!(services.bins.get(bin).await.unwrap().shelf_id, old_shelf);
}

#[tokio::test]
async fn bin_delete_clears_placements_without_stock() {
    let app = TestApp::new().await;
    let tree = app.seed_tree(40).await;
    let services = &app.state.services;
    let bin = bin_id(&tree);

    let inventory_id = app.seed_inventory("Backordered", 12).await;
    services
        .inventory_locations
        .place(&place_request(&tree, inventory_id, 0))
        .await
        .unwrap();
    assert!(services.bins.delete(Some(bin), None, None).await.is_err());

    // stock driven to zero, the placement row is still there
    services.inventory.set_stock(inventory_id, 0).await.unwrap();
    assert_eq!(services.bins.occupancy(bin).await.unwrap().current_stock, 0);
    assert_eq!(app.placement_count().await, 1);

    assert_eq!(services.bins.delete(Some(bin), None, None).await.unwrap(), 1);
    assert_eq!(app.placement_count().await, 0);
    assert!(matches!(
        services.inventory_locations.get_by_inventory(inventory_id).await,
        Err(ServiceError::NotFound(_))
    ));
}

#[tokio::test]
async fn shelf_cascade_clears_empty_placements_too() {
    let app = TestApp::new().await;
    let tree = app.seed_tree(40).await;
    let services = &app.state.services;
    let shelf_id = tree.floors[0].rooms[0].aisles[0].shelves[0].id;

    let inventory_id = app.seed_inventory("Empty crate", 0).await;
    services
        .inventory_locations
        .place(&place_request(&tree, inventory_id, 0))
        .await
        .unwrap();

    services
        .shelves
        .delete(Some(shelf_id), None, None)
        .await
        .unwrap();
    assert_eq!(app.placement_count().await, 0);
    assert!(matches!(
        services.bins.get(bin_id(&tree)).await,
        Err(ServiceError::NotFound(_))
    ));
}

#[tokio::test]
async fn placing_again_moves_the_inventory() {
    let app = TestApp::new().await;
    let tree = app.seed_tree(40).await;
    let services = &app.state.services;
    let shelf_id = tree.floors[0].rooms[0].aisles[0].shelves[0].id;

    services
        .bins
        .create(shelf_id, &bin_request("B2", 40), None)
        .await
        .unwrap();
    let tree = services.warehouses.get(tree.id).await.unwrap();

    let inventory_id = app.seed_inventory("Tiles", 35).await;
    let first = services
        .inventory_locations
        .place(&place_request(&tree, inventory_id, 0))
        .await
        .unwrap();
    // re-placing into the same bin does not count the record twice
    services
        .inventory_locations
        .place(&place_request(&tree, inventory_id, 0))
        .await
        .unwrap();
    let moved = services
        .inventory_locations
        .place(&place_request(&tree, inventory_id, 1))
        .await
        .unwrap();

    assert_eq!(moved.id, first.id);
    assert_eq!(moved.bin.name, "B2");
    assert_eq!(app.placement_count().await, 1);

    let by_inventory = services
        .inventory_locations
        .get_by_inventory(inventory_id)
        .await
        .unwrap();
    assert_eq!(by_inventory.bin.id, moved.bin.id);
    assert_eq!(services.bins.occupancy(bin_id(&tree)).await.unwrap().current_stock, 0);
}

#[tokio::test]
async fn placement_lookups_and_removal() {
    let app = TestApp::new().await;
    let tree = app.seed_tree(40).await;
    let assigner = &app.state.services.inventory_locations;

    let inventory_id = app.seed_inventory("Cables", 12).await;
    let placed = assigner.place(&place_request(&tree, inventory_id, 0)).await.unwrap();

    let fetched = assigner.get(placed.id).await.unwrap();
    assert_eq!(fetched, placed);
    assert_eq!(fetched.warehouse.name, "W1");
    assert_eq!(fetched.floor.name, "F1");
    assert_eq!(fetched.room.name, "R1");
    assert_eq!(fetched.aisle.name, "A1");
    assert_eq!(fetched.shelf.name, "S1");

    assigner.remove(placed.id).await.unwrap();
    assert!(matches!(
        assigner.get(placed.id).await,
        Err(ServiceError::NotFound(_))
    ));
    assert!(matches!(
        assigner.get_by_inventory(inventory_id).await,
        Err(ServiceError::NotFound(msg)) if msg.contains("No location")
    ));
    assert!(matches!(
        assigner.remove(placed.id).await,
        Err(ServiceError::NotFound(_))
    ));
}

#[tokio::test]
async fn placement_path_must_be_consistent() {
    let app = TestApp::new().await;
    let tree = app.seed_tree(40).await;
    let other = app.seed_tree(40).await;
    let assigner = &app.state.services.inventory_locations;
    let inventory_id = app.seed_inventory("Fuses", 1).await;

    let mut request = place_request(&tree, inventory_id, 0);
    request.floor_id = other.floors[0].id;

    let err = assigner.place(&request).await.unwrap_err();
    assert!(matches!(err, ServiceError::ValidationError(msg) if msg.contains("does not belong to warehouse")));
    assert_eq!(app.placement_count().await, 0);
}
