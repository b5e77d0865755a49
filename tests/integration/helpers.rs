//! Shared test helpers for integration tests.
//!
//! Every `TestApp` runs the full router over a fresh in-memory store.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use smartpark_api::{AppState, build_app};
use smartpark_core::config::{AppConfig, StoreProvider};
use smartpark_database::{MemoryStore, StoreManager};
use smartpark_entity::user::UserRole;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for seeding data behind the API
    pub state: AppState,
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.database.provider = StoreProvider::Memory;
        config.auth.jwt_secret = "integration-test-secret".to_string();

        let stores = StoreManager::from_memory(MemoryStore::new());
        let state = AppState::new(config, stores);
        let router = build_app(state.clone());

        Self { router, state }
    }

    /// Create a user directly, bypassing the registration role downgrade
    pub async fn create_user(&self, username: &str, password: &str, role: UserRole) -> i64 {
        self.state
            .auth_service
            .create_user(username, password, role)
            .await
            .expect("Failed to create test user")
            .id
    }

    /// Login and return the bearer token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(json!({ "username": username, "password": password })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {:?}", response.body);
        response.data()["token"]
            .as_str()
            .expect("No token in login response")
            .to_string()
    }

    /// A logged-in staff operator's token
    pub async fn staff_token(&self) -> String {
        self.create_user("operator", "secret123", UserRole::Staff)
            .await;
        self.login("operator", "secret123").await
    }

    /// Register a car through the API
    pub async fn seed_car(&self, token: &str, plate_number: &str) {
        let response = self
            .request(
                "POST",
                "/api/cars",
                Some(json!({
                    "plateNumber": plate_number,
                    "driverName": "Alice Uwase",
                    "carType": "Sedan",
                    "carSize": "medium",
                    "phoneNumber": "0788000000",
                })),
                Some(token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    }

    /// Add a slot through the API and return its number
    pub async fn seed_slot(&self, token: &str) -> i64 {
        let response = self
            .request("POST", "/api/parkingslots", None, Some(token))
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.data()["slotNumber"]
            .as_i64()
            .expect("No slot number in response")
    }

    /// Park a car through the API and return the record id
    pub async fn enter(&self, token: &str, plate_number: &str, slot_number: i64) -> TestResponse {
        self.request(
            "POST",
            "/api/parkingrecords",
            Some(json!({ "plateNumber": plate_number, "slotNumber": slot_number })),
            Some(token),
        )
        .await
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response body as JSON
    pub body: Value,
}

impl TestResponse {
    /// The `data` member of a success envelope
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// The `message` member of an error body
    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }
}
