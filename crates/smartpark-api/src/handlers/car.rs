//! Car handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use smartpark_entity::car::Car;

use crate::dto::request::{CreateCarRequest, UpdateCarRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/cars
pub async fn list_cars(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Car>>>, ApiError> {
    let cars = state.car_service.list().await?;
    Ok(Json(ApiResponse::ok(cars)))
}

/// GET /api/cars/{plate}
pub async fn get_car(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(plate): Path<String>,
) -> Result<Json<ApiResponse<Car>>, ApiError> {
    let car = state.car_service.get(&plate).await?;
    Ok(Json(ApiResponse::ok(car)))
}

/// POST /api/cars
pub async fn create_car(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateCarRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Car>>), ApiError> {
    let car = state.car_service.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(car))))
}

/// PUT /api/cars/{plate}
pub async fn update_car(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(plate): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateCarRequest>,
) -> Result<Json<ApiResponse<Car>>, ApiError> {
    let car = state.car_service.update(&auth, &plate, req.into()).await?;
    Ok(Json(ApiResponse::ok(car)))
}

/// DELETE /api/cars/{plate}
pub async fn delete_car(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(plate): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.car_service.delete(&auth, &plate).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Car deleted successfully",
    ))))
}
