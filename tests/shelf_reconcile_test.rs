mod common;

use common::{bin_request, TestApp};
use sea_orm::TransactionTrait;
use warehouse_locations_api::{
    dto::locations::{ShelfBinInput, ShelfNode, UpdateShelfRequest},
    errors::ServiceError,
    repositories::LevelStore,
};

/// Seeds a shelf holding bins A, B and C.
async fn seed_shelf(app: &TestApp) -> ShelfNode {
    let tree = app.seed_tree(10).await;
    let shelves = &app.state.services.shelves;
    let aisle_id = tree.floors[0].rooms[0].aisles[0].id;

    let shelf_id = shelves
        .create(
            aisle_id,
            &common::shelf_request(
                "Reconcile",
                vec![bin_request("A", 10), bin_request("B", 10), bin_request("C", 10)],
            ),
            None,
        )
        .await
        .unwrap();
    shelves.get(shelf_id).await.unwrap()
}

fn input(id: Option<i32>, name: &str, capacity: i32) -> ShelfBinInput {
    ShelfBinInput {
        id,
        name: name.to_string(),
        capacity,
    }
}

#[tokio::test]
async fn update_reconciles_bins_against_the_list() {
    let app = TestApp::new().await;
    let shelf = seed_shelf(&app).await;
    let services = &app.state.services;
    let (a, b, c) = (shelf.bins[0].id, shelf.bins[1].id, shelf.bins[2].id);

    let request = UpdateShelfRequest {
        name: None,
        bins: Some(vec![input(Some(a), "A2", 12), input(None, "D", 8)]),
    };
    let updated = services.shelves.update(shelf.id, &request).await.unwrap();

    assert_eq!(updated.name, "Reconcile");
    let names: Vec<&str> = updated.bins.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["A2", "D"]);
    assert_eq!(updated.bins[0].id, a);
    assert_eq!(updated.bins[0].capacity, 12);

    for removed in [b, c] {
        assert!(matches!(
            services.bins.get(removed).await,
            Err(ServiceError::NotFound(_))
        ));
    }
}

#[tokio::test]
async fn update_without_bins_leaves_them_alone() {
    let app = TestApp::new().await;
    let shelf = seed_shelf(&app).await;

    let request = UpdateShelfRequest {
        name: Some("Renamed".to_string()),
        bins: None,
    };
    let updated = app
        .state
        .services
        .shelves
        .update(shelf.id, &request)
        .await
        .unwrap();

    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.bins, shelf.bins);
}

#[tokio::test]
async fn empty_list_deletes_every_bin() {
    let app = TestApp::new().await;
    let shelf = seed_shelf(&app).await;

    let request = UpdateShelfRequest {
        name: None,
        bins: Some(vec![]),
    };
    let updated = app
        .state
        .services
        .shelves
        .update(shelf.id, &request)
        .await
        .unwrap();
    assert!(updated.bins.is_empty());
}

#[tokio::test]
async fn unknown_bin_id_rolls_back_the_whole_update() {
    let app = TestApp::new().await;
    let shelf = seed_shelf(&app).await;
    let services = &app.state.services;
    let a = shelf.bins[0].id;

    let request = UpdateShelfRequest {
        name: Some("Half done".to_string()),
        bins: Some(vec![
            input(Some(a), "A2", 12),
            input(None, "D", 8),
            input(Some(9_999), "Ghost", 1),
        ]),
    };
    let err = services.shelves.update(shelf.id, &request).await.unwrap_err();

    assert!(matches!(err, ServiceError::TransactionFailed { level: "Shelf", .. }));
    assert!(matches!(err.root_cause(), ServiceError::NotFound(msg) if msg.contains("not found on shelf")));

    // shelf is exactly as seeded
    assert_eq!(services.shelves.get(shelf.id).await.unwrap(), shelf);
}

#[tokio::test]
async fn bins_of_another_shelf_are_not_claimed() {
    let app = TestApp::new().await;
    let shelf = seed_shelf(&app).await;
    let services = &app.state.services;
    let other = seed_shelf(&app).await;

    let request = UpdateShelfRequest {
        name: None,
        bins: Some(vec![input(Some(other.bins[0].id), "Stolen", 1)]),
    };
    let err = services.shelves.update(shelf.id, &request).await.unwrap_err();
    assert!(matches!(err.root_cause(), ServiceError::NotFound(_)));
    assert_eq!(services.shelves.get(other.id).await.unwrap(), other);
}

#[tokio::test]
async fn reconcile_reports_what_it_did() {
    let app = TestApp::new().await;
    let shelf = seed_shelf(&app).await;
    let shelves = &app.state.services.shelves;
    let (a, b, c) = (shelf.bins[0].id, shelf.bins[1].id, shelf.bins[2].id);

    let txn = app.db().begin().await.unwrap();
    let outcome = shelves
        .reconcile_bins(
            shelf.id,
            &[input(Some(b), "B", 10), input(None, "E", 4)],
            &txn,
        )
        .await
        .unwrap();
    txn.commit().await.unwrap();

    assert_eq!(outcome.updated, vec![b]);
    assert_eq!(outcome.created.len(), 1);
    assert_eq!(outcome.deleted, vec![a, c]);
}
