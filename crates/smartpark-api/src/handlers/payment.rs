//! Parking payment handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use smartpark_entity::payment::{Payment, PaymentDetail};

use crate::dto::request::{CreatePaymentRequest, UpdatePaymentRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::path::parse_id;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/pspayments
pub async fn list_payments(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<PaymentDetail>>>, ApiError> {
    let payments = state.payment_service.list().await?;
    Ok(Json(ApiResponse::ok(payments)))
}

/// GET /api/pspayments/car/{plate}
pub async fn list_car_payments(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(plate): Path<String>,
) -> Result<Json<ApiResponse<Vec<PaymentDetail>>>, ApiError> {
    let payments = state.payment_service.list_by_car(&plate).await?;
    Ok(Json(ApiResponse::ok(payments)))
}

/// GET /api/pspayments/{n}
pub async fn get_payment(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(payment_number): Path<String>,
) -> Result<Json<ApiResponse<PaymentDetail>>, ApiError> {
    let payment = state
        .payment_service
        .get(parse_id(&payment_number)?)
        .await?;
    Ok(Json(ApiResponse::ok(payment)))
}

/// POST /api/pspayments
pub async fn create_payment(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreatePaymentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Payment>>), ApiError> {
    let payment = state
        .payment_service
        .create(
            &auth,
            req.plate_number.trim(),
            req.amount_paid,
            req.payment_date,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(payment))))
}

/// PUT /api/pspayments/{n}
pub async fn update_payment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(payment_number): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdatePaymentRequest>,
) -> Result<Json<ApiResponse<Payment>>, ApiError> {
    let payment = state
        .payment_service
        .update(&auth, parse_id(&payment_number)?, req.amount_paid)
        .await?;
    Ok(Json(ApiResponse::ok(payment)))
}

/// DELETE /api/pspayments/{n}
pub async fn delete_payment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(payment_number): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .payment_service
        .delete(&auth, parse_id(&payment_number)?)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Payment deleted successfully",
    ))))
}
