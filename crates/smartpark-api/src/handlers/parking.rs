//! Parking record handlers: entry, exit and history.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use smartpark_entity::parking::{ParkingRecord, ParkingRecordDetail};

use crate::dto::request::ParkingEntryRequest;
use crate::dto::response::{ApiResponse, ExitResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::path::parse_id;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/parkingrecords
pub async fn list_records(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<ParkingRecordDetail>>>, ApiError> {
    let records = state.occupancy_service.list().await?;
    Ok(Json(ApiResponse::ok(records)))
}

/// GET /api/parkingrecords/active
pub async fn list_active(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<ParkingRecordDetail>>>, ApiError> {
    let records = state.occupancy_service.list_active().await?;
    Ok(Json(ApiResponse::ok(records)))
}

/// GET /api/parkingrecords/{id}
pub async fn get_record(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ParkingRecordDetail>>, ApiError> {
    let record = state.occupancy_service.get(parse_id(&id)?).await?;
    Ok(Json(ApiResponse::ok(record)))
}

/// POST /api/parkingrecords
pub async fn register_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<ParkingEntryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ParkingRecord>>), ApiError> {
    let record = state
        .occupancy_service
        .register_entry(&auth, req.plate_number.trim(), req.slot_number)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(record))))
}

/// PUT /api/parkingrecords/{id}/exit
pub async fn register_exit(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ExitResponse>>, ApiError> {
    let summary = state
        .occupancy_service
        .register_exit(&auth, parse_id(&id)?)
        .await?;
    Ok(Json(ApiResponse::ok(ExitResponse {
        message: "Car exit registered successfully".to_string(),
        parking_id: summary.id,
        duration: summary.duration,
    })))
}

/// DELETE /api/parkingrecords/{id}
pub async fn delete_record(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .occupancy_service
        .delete_record(&auth, parse_id(&id)?)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Parking record deleted successfully",
    ))))
}
