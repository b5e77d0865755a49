//! Report handler.

use axum::Json;
use axum::extract::{Query, State};

use smartpark_entity::report::ParkingReport;

use crate::dto::request::ReportQuery;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/reports and GET /api/reports/parking
pub async fn parking_report(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ReportQuery>,
) -> Result<Json<ApiResponse<ParkingReport>>, ApiError> {
    let report = state
        .report_service
        .parking_report(query.from_date.as_deref(), query.to_date.as_deref())
        .await?;
    Ok(Json(ApiResponse::ok(report)))
}
