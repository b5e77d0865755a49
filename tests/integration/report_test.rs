//! Integration tests for the parking report.

mod helpers;

use axum::http::StatusCode;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::json;

use smartpark_database::store::{EntryOutcome, ParkingStore};

fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

/// Open a record with a chosen entry time straight through the store.
async fn park_at(app: &helpers::TestApp, plate: &str, slot: i64, entry: DateTime<Utc>) -> i64 {
    match app
        .state
        .stores
        .records
        .open_record(plate, slot as i32, entry)
        .await
        .unwrap()
    {
        EntryOutcome::Opened(record) => record.id,
        other => panic!("unexpected outcome: {other:?}"),
    }
}

async fn leave_at(app: &helpers::TestApp, id: i64, exit: DateTime<Utc>) {
    app.state
        .stores
        .records
        .close_record(id, exit)
        .await
        .unwrap()
        .expect("record should be open");
}

#[tokio::test]
async fn test_report_requires_dates() {
    let app = helpers::TestApp::new();
    let token = app.staff_token().await;

    let missing = app
        .request("GET", "/api/reports?fromDate=2024-01-01", None, Some(&token))
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.message(), "From date and to date are required");

    let malformed = app
        .request(
            "GET",
            "/api/reports?fromDate=2024-1-1&toDate=2024-01-31",
            None,
            Some(&token),
        )
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
    assert_eq!(malformed.message(), "Invalid date format. Use YYYY-MM-DD");

    let reversed = app
        .request(
            "GET",
            "/api/reports?fromDate=2024-02-01&toDate=2024-01-01",
            None,
            Some(&token),
        )
        .await;
    assert_eq!(reversed.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_empty_range_yields_zeros() {
    let app = helpers::TestApp::new();
    let token = app.staff_token().await;

    let response = app
        .request(
            "GET",
            "/api/reports/parking?fromDate=2024-01-01&toDate=2024-01-31",
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = response.data();
    assert_eq!(data["fixedParkingFee"], 500);
    assert_eq!(data["totalParkings"], 0);
    assert_eq!(data["activeParking"], 0);
    assert_eq!(data["completedParkings"], 0);
    assert_eq!(data["avgDuration"], 0.0);
    assert_eq!(data["currentRevenue"], 0);
    assert_eq!(data["collectedRevenue"], 0);
    assert_eq!(data["parkingsByDay"], json!([]));
    assert_eq!(data["fromDate"], "2024-01-01");
    assert_eq!(data["toDate"], "2024-01-31");
}

#[tokio::test]
async fn test_report_aggregates_range() {
    let app = helpers::TestApp::new();
    let token = app.staff_token().await;
    for plate in ["RAB001A", "RAB002A", "RAB003A", "RAB004A"] {
        app.seed_car(&token, plate).await;
    }
    let slots = [
        app.seed_slot(&token).await,
        app.seed_slot(&token).await,
        app.seed_slot(&token).await,
        app.seed_slot(&token).await,
    ];

    // Two closed sessions on Jan 10 (30 and 90 minutes), one open on Jan 12.
    let a = park_at(&app, "RAB001A", slots[0], at(2024, 1, 10, 8)).await;
    leave_at(&app, a, at(2024, 1, 10, 8) + Duration::minutes(30)).await;
    let b = park_at(&app, "RAB002A", slots[1], at(2024, 1, 10, 9)).await;
    leave_at(&app, b, at(2024, 1, 10, 9) + Duration::minutes(90)).await;
    park_at(&app, "RAB003A", slots[2], at(2024, 1, 12, 23)).await;
    // Outside the range.
    park_at(&app, "RAB004A", slots[3], at(2024, 2, 1, 0)).await;

    for (amount, date) in [(700, "2024-01-10T10:00:00Z"), (300, "2024-01-31T23:59:59Z"), (999, "2024-02-01T00:00:00Z")] {
        let response = app
            .request(
                "POST",
                "/api/pspayments",
                Some(json!({ "plateNumber": "RAB001A", "amountPaid": amount, "paymentDate": date })),
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    let response = app
        .request(
            "GET",
            "/api/reports?fromDate=2024-01-01&toDate=2024-01-31",
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = response.data();
    assert_eq!(data["totalParkings"], 3);
    assert_eq!(data["activeParking"], 1);
    assert_eq!(data["completedParkings"], 2);
    assert_eq!(data["avgDuration"], 60.0);
    assert_eq!(data["currentRevenue"], 500);
    assert_eq!(data["collectedRevenue"], 1000);
    assert_eq!(
        data["parkingsByDay"],
        json!([
            { "date": "2024-01-10", "count": 2 },
            { "date": "2024-01-12", "count": 1 },
        ])
    );
}

#[tokio::test]
async fn test_report_requires_token() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "GET",
            "/api/reports?fromDate=2024-01-01&toDate=2024-01-31",
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}
