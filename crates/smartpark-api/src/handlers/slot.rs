//! Parking slot handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use smartpark_entity::slot::{ParkingSlot, SlotStatus};

use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::extractors::path::parse_slot_number;
use crate::state::AppState;

/// GET /api/parkingslots
pub async fn list_slots(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<ParkingSlot>>>, ApiError> {
    let slots = state.slot_service.list(None).await?;
    Ok(Json(ApiResponse::ok(slots)))
}

/// GET /api/parkingslots/available
pub async fn list_available(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<ParkingSlot>>>, ApiError> {
    let slots = state.slot_service.list(Some(SlotStatus::Available)).await?;
    Ok(Json(ApiResponse::ok(slots)))
}

/// GET /api/parkingslots/occupied
pub async fn list_occupied(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<ParkingSlot>>>, ApiError> {
    let slots = state.slot_service.list(Some(SlotStatus::Occupied)).await?;
    Ok(Json(ApiResponse::ok(slots)))
}

/// GET /api/parkingslots/{n}
pub async fn get_slot(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(slot_number): Path<String>,
) -> Result<Json<ApiResponse<ParkingSlot>>, ApiError> {
    let slot = state
        .slot_service
        .get(parse_slot_number(&slot_number)?)
        .await?;
    Ok(Json(ApiResponse::ok(slot)))
}

/// POST /api/parkingslots
///
/// New slots always start available; no body is read.
pub async fn create_slot(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<(StatusCode, Json<ApiResponse<ParkingSlot>>), ApiError> {
    let slot = state.slot_service.create(&auth).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(slot))))
}

/// DELETE /api/parkingslots/{n}
pub async fn delete_slot(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(slot_number): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .slot_service
        .delete(&auth, parse_slot_number(&slot_number)?)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Parking slot deleted successfully",
    ))))
}
