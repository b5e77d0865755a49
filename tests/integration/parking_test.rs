//! Integration tests for car entry, exit, and record lifecycle.

mod helpers;

use std::sync::Arc;

use axum::http::StatusCode;

async fn slot_status(app: &helpers::TestApp, token: &str, slot_number: i64) -> String {
    let response = app
        .request(
            "GET",
            &format!("/api/parkingslots/{slot_number}"),
            None,
            Some(token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    response.data()["status"]
        .as_str()
        .unwrap_or_default()
        .to_string()
}

#[tokio::test]
async fn test_entry_occupies_slot() {
    let app = helpers::TestApp::new();
    let token = app.staff_token().await;
    app.seed_car(&token, "RAB123A").await;
    let slot = app.seed_slot(&token).await;

    let response = app.enter(&token, "RAB123A", slot).await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.data()["plateNumber"], "RAB123A");
    assert_eq!(response.data()["slotNumber"], slot);
    assert!(response.data()["exitTime"].is_null());
    assert!(response.data()["duration"].is_null());
    assert_eq!(slot_status(&app, &token, slot).await, "occupied");
}

#[tokio::test]
async fn test_entry_preconditions() {
    let app = helpers::TestApp::new();
    let token = app.staff_token().await;
    app.seed_car(&token, "RAB123A").await;
    app.seed_car(&token, "RAC456B").await;
    let first = app.seed_slot(&token).await;
    let second = app.seed_slot(&token).await;

    let response = app.enter(&token, "UNKNOWN", first).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.message(), "Car not found");

    let response = app.enter(&token, "RAB123A", 999).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.message(), "Parking slot not found");

    assert_eq!(
        app.enter(&token, "RAB123A", first).await.status,
        StatusCode::CREATED
    );

    let response = app.enter(&token, "RAC456B", first).await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.message(), "Parking slot is already occupied");

    let response = app.enter(&token, "RAB123A", second).await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(
        response.message(),
        format!("This car is already parked in slot {first}")
    );
    assert_eq!(slot_status(&app, &token, second).await, "available");
}

#[tokio::test]
async fn test_exit_frees_slot_and_sets_duration() {
    let app = helpers::TestApp::new();
    let token = app.staff_token().await;
    app.seed_car(&token, "RAB123A").await;
    let slot = app.seed_slot(&token).await;
    let id = app.enter(&token, "RAB123A", slot).await.data()["id"]
        .as_i64()
        .unwrap();

    let response = app
        .request(
            "PUT",
            &format!("/api/parkingrecords/{id}/exit"),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["parkingId"], id);
    assert_eq!(response.data()["duration"], 0);
    assert_eq!(slot_status(&app, &token, slot).await, "available");

    let record = app
        .request("GET", &format!("/api/parkingrecords/{id}"), None, Some(&token))
        .await;
    assert_eq!(record.status, StatusCode::OK);
    assert!(!record.data()["exitTime"].is_null());
    assert_eq!(record.data()["duration"], 0);
    assert_eq!(record.data()["driverName"], "Alice Uwase");

    let again = app
        .request(
            "PUT",
            &format!("/api/parkingrecords/{id}/exit"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
    assert_eq!(again.message(), "Active parking record not found");
}

#[tokio::test]
async fn test_car_can_park_again_after_exit() {
    let app = helpers::TestApp::new();
    let token = app.staff_token().await;
    app.seed_car(&token, "RAB123A").await;
    let slot = app.seed_slot(&token).await;
    let id = app.enter(&token, "RAB123A", slot).await.data()["id"]
        .as_i64()
        .unwrap();
    app.request(
        "PUT",
        &format!("/api/parkingrecords/{id}/exit"),
        None,
        Some(&token),
    )
    .await;

    let response = app.enter(&token, "RAB123A", slot).await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_ne!(response.data()["id"], id);
}

#[tokio::test]
async fn test_delete_open_record_frees_slot() {
    let app = helpers::TestApp::new();
    let token = app.staff_token().await;
    app.seed_car(&token, "RAB123A").await;
    let slot = app.seed_slot(&token).await;
    let id = app.enter(&token, "RAB123A", slot).await.data()["id"]
        .as_i64()
        .unwrap();

    let response = app
        .request(
            "DELETE",
            &format!("/api/parkingrecords/{id}"),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(slot_status(&app, &token, slot).await, "available");

    let missing = app
        .request(
            "DELETE",
            &format!("/api/parkingrecords/{id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.message(), "Parking record not found");
}

#[tokio::test]
async fn test_active_listing_only_has_open_records() {
    let app = helpers::TestApp::new();
    let token = app.staff_token().await;
    app.seed_car(&token, "RAB123A").await;
    app.seed_car(&token, "RAC456B").await;
    let first = app.seed_slot(&token).await;
    let second = app.seed_slot(&token).await;
    let closed = app.enter(&token, "RAB123A", first).await.data()["id"]
        .as_i64()
        .unwrap();
    app.enter(&token, "RAC456B", second).await;
    app.request(
        "PUT",
        &format!("/api/parkingrecords/{closed}/exit"),
        None,
        Some(&token),
    )
    .await;

    let active = app
        .request("GET", "/api/parkingrecords/active", None, Some(&token))
        .await;
    let all = app
        .request("GET", "/api/parkingrecords", None, Some(&token))
        .await;

    let active = active.data().as_array().unwrap().clone();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0]["plateNumber"], "RAC456B");
    assert_eq!(active[0]["slotStatus"], "occupied");
    assert_eq!(all.data().as_array().unwrap().len(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_entries_for_one_slot() {
    let app = Arc::new(helpers::TestApp::new());
    let token = app.staff_token().await;
    let plates: Vec<String> = (0..8).map(|i| format!("RAD{i:03}C")).collect();
    for plate in &plates {
        app.seed_car(&token, plate).await;
    }
    let slot = app.seed_slot(&token).await;

    let handles: Vec<_> = plates
        .into_iter()
        .map(|plate| {
            let app = Arc::clone(&app);
            let token = token.clone();
            tokio::spawn(async move { app.enter(&token, &plate, slot).await.status })
        })
        .collect();

    let mut created = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            StatusCode::CREATED => created += 1,
            StatusCode::CONFLICT => conflicts += 1,
            other => panic!("unexpected status {other}"),
        }
    }
    assert_eq!(created, 1);
    assert_eq!(conflicts, 7);

    let active = app
        .request("GET", "/api/parkingrecords/active", None, Some(&token))
        .await;
    assert_eq!(active.data().as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_bad_record_id_is_validation_error() {
    let app = helpers::TestApp::new();
    let token = app.staff_token().await;

    let response = app
        .request("GET", "/api/parkingrecords/abc", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
