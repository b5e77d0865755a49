//! Integration tests for car, slot, and payment resources.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_car_crud() {
    let app = helpers::TestApp::new();
    let token = app.staff_token().await;
    app.seed_car(&token, "RAB123A").await;

    let duplicate = app
        .request(
            "POST",
            "/api/cars",
            Some(json!({
                "plateNumber": "RAB123A",
                "driverName": "Bob",
                "carType": "SUV",
                "phoneNumber": "0788111111",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let updated = app
        .request(
            "PUT",
            "/api/cars/RAB123A",
            Some(json!({
                "driverName": "Alice Mukamana",
                "carType": "Sedan",
                "phoneNumber": "0788222222",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.data()["driverName"], "Alice Mukamana");
    assert!(updated.data()["carSize"].is_null());

    let listed = app.request("GET", "/api/cars", None, Some(&token)).await;
    assert_eq!(listed.data().as_array().unwrap().len(), 1);

    let deleted = app
        .request("DELETE", "/api/cars/RAB123A", None, Some(&token))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let missing = app
        .request("GET", "/api/cars/RAB123A", None, Some(&token))
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.message(), "Car not found");
}

#[tokio::test]
async fn test_car_missing_fields_rejected() {
    let app = helpers::TestApp::new();
    let token = app.staff_token().await;

    let response = app
        .request(
            "POST",
            "/api/cars",
            Some(json!({ "plateNumber": "RAB123A", "driverName": "", "carType": "Sedan", "phoneNumber": "1" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_blank_plate_rejected() {
    let app = helpers::TestApp::new();
    let token = app.staff_token().await;

    let response = app
        .request(
            "POST",
            "/api/cars",
            Some(json!({
                "plateNumber": "   ",
                "driverName": "Bob",
                "carType": "SUV",
                "phoneNumber": "0788111111",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Plate number is required");
    let listed = app.request("GET", "/api/cars", None, Some(&token)).await;
    assert_eq!(listed.data(), &json!([]));
}

#[tokio::test]
async fn test_car_with_history_cannot_be_deleted() {
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

    let response = app
        .request("DELETE", "/api/cars/RAB123A", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(
        response.message(),
        "Cannot delete car with existing parking records or payments"
    );
}

#[tokio::test]
async fn test_slot_filters_and_deletion_rules() {
    let app = helpers::TestApp::new();
    let token = app.staff_token().await;
    app.seed_car(&token, "RAB123A").await;
    let used = app.seed_slot(&token).await;
    let fresh = app.seed_slot(&token).await;
    assert_ne!(used, fresh);
    app.enter(&token, "RAB123A", used).await;

    let available = app
        .request("GET", "/api/parkingslots/available", None, Some(&token))
        .await;
    let occupied = app
        .request("GET", "/api/parkingslots/occupied", None, Some(&token))
        .await;
    assert_eq!(available.data()[0]["slotNumber"], fresh);
    assert_eq!(available.data().as_array().unwrap().len(), 1);
    assert_eq!(occupied.data()[0]["slotNumber"], used);

    let blocked = app
        .request(
            "DELETE",
            &format!("/api/parkingslots/{used}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(blocked.status, StatusCode::CONFLICT);
    assert_eq!(
        blocked.message(),
        "Cannot delete parking slot that is in use or has parking history"
    );

    let removed = app
        .request(
            "DELETE",
            &format!("/api/parkingslots/{fresh}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(removed.status, StatusCode::OK);

    let gone = app
        .request(
            "GET",
            &format!("/api/parkingslots/{fresh}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_new_slot_is_available() {
    let app = helpers::TestApp::new();
    let token = app.staff_token().await;

    let response = app
        .request("POST", "/api/parkingslots", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.data()["status"], "available");
}

#[tokio::test]
async fn test_payment_crud() {
    let app = helpers::TestApp::new();
    let token = app.staff_token().await;
    app.seed_car(&token, "RAB123A").await;

    let created = app
        .request(
            "POST",
            "/api/pspayments",
            Some(json!({ "plateNumber": "RAB123A", "amountPaid": 1500 })),
            Some(&token),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let number = created.data()["paymentNumber"].as_i64().unwrap();
    assert_eq!(created.data()["amountPaid"], 1500);

    let fetched = app
        .request(
            "GET",
            &format!("/api/pspayments/{number}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.data()["driverName"], "Alice Uwase");

    let updated = app
        .request(
            "PUT",
            &format!("/api/pspayments/{number}"),
            Some(json!({ "amountPaid": 2000 })),
            Some(&token),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.data()["amountPaid"], 2000);

    let by_car = app
        .request("GET", "/api/pspayments/car/RAB123A", None, Some(&token))
        .await;
    assert_eq!(by_car.data().as_array().unwrap().len(), 1);

    let deleted = app
        .request(
            "DELETE",
            &format!("/api/pspayments/{number}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let missing = app
        .request(
            "GET",
            &format!("/api/pspayments/{number}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.message(), "Payment not found");
}

#[tokio::test]
async fn test_payment_rejections() {
    let app = helpers::TestApp::new();
    let token = app.staff_token().await;
    app.seed_car(&token, "RAB123A").await;

    let unknown_car = app
        .request(
            "POST",
            "/api/pspayments",
            Some(json!({ "plateNumber": "NOPE", "amountPaid": 100 })),
            Some(&token),
        )
        .await;
    assert_eq!(unknown_car.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown_car.message(), "Car not found");

    let negative = app
        .request(
            "POST",
            "/api/pspayments",
            Some(json!({ "plateNumber": "RAB123A", "amountPaid": -5 })),
            Some(&token),
        )
        .await;
    assert_eq!(negative.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_car_with_payment_cannot_be_deleted() {
    let app = helpers::TestApp::new();
    let token = app.staff_token().await;
    app.seed_car(&token, "RAB123A").await;
    app.request(
        "POST",
        "/api/pspayments",
        Some(json!({ "plateNumber": "RAB123A", "amountPaid": 500 })),
        Some(&token),
    )
    .await;

    let response = app
        .request("DELETE", "/api/cars/RAB123A", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}
