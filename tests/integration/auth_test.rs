//! Integration tests for authentication flow.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use smartpark_entity::user::UserRole;

#[tokio::test]
async fn test_register_then_login() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "username": "clerk", "password": "password123" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.data()["username"], "clerk");
    assert_eq!(response.data()["role"], "staff");
    assert!(response.data().get("passwordHash").is_none());

    let token = app.login("clerk", "password123").await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_register_never_creates_admin() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "username": "sneaky", "password": "password123", "role": "admin" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.data()["role"], "staff");
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = helpers::TestApp::new();
    app.create_user("taken", "password123", UserRole::Staff)
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "username": "taken", "password": "password123" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_register_short_password() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "username": "shorty", "password": "abc" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_login_invalid_password() {
    let app = helpers::TestApp::new();
    app.create_user("staffer", "password123", UserRole::Staff)
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "staffer", "password": "wrongpassword" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "Invalid password");
}

#[tokio::test]
async fn test_login_nonexistent_user() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "nobody", "password": "password123" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.message(), "User not found");
}

#[tokio::test]
async fn test_login_malformed_body() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "nobody" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_profile_returns_current_user() {
    let app = helpers::TestApp::new();
    app.create_user("boss", "password123", UserRole::Admin)
        .await;
    let token = app.login("boss", "password123").await;

    let response = app
        .request("GET", "/api/auth/profile", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["username"], "boss");
    assert_eq!(response.data()["role"], "admin");
}

#[tokio::test]
async fn test_user_listing_is_admin_only() {
    let app = helpers::TestApp::new();
    app.create_user("boss", "password123", UserRole::Admin)
        .await;
    let admin = app.login("boss", "password123").await;
    let staff = app.staff_token().await;

    let refused = app
        .request("GET", "/api/auth/users", None, Some(&staff))
        .await;
    assert_eq!(refused.status, StatusCode::FORBIDDEN);
    assert_eq!(refused.message(), "Require Admin Role!");

    let listed = app
        .request("GET", "/api/auth/users", None, Some(&admin))
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    let users = listed.data().as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|u| u.get("passwordHash").is_none()));
}

#[tokio::test]
async fn test_missing_token_is_forbidden() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/cars", None, None).await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.message(), "No token provided");
}

#[tokio::test]
async fn test_invalid_token_is_unauthorized() {
    let app = helpers::TestApp::new();

    let response = app
        .request("GET", "/api/parkingslots", None, Some("not-a-jwt"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_is_public() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.data()["status"], "ok");
}
