//! Parking report over a date range.

use std::sync::Arc;

use tracing::debug;

use smartpark_core::config::ParkingConfig;
use smartpark_core::error::AppError;
use smartpark_database::store::ReportStore;
use smartpark_entity::report::{ParkingReport, ReportRange};

/// Builds read-only reports from store aggregates.
#[derive(Debug, Clone)]
pub struct ReportService {
    reports: Arc<dyn ReportStore>,
    fixed_fee: i64,
}

impl ReportService {
    /// Creates a new report service charging the configured flat fee.
    pub fn new(reports: Arc<dyn ReportStore>, parking: &ParkingConfig) -> Self {
        Self {
            reports,
            fixed_fee: parking.fixed_fee,
        }
    }

    /// Report for the raw `fromDate` / `toDate` query values.
    pub async fn parking_report(
        &self,
        from_date: Option<&str>,
        to_date: Option<&str>,
    ) -> Result<ParkingReport, AppError> {
        let range = ReportRange::parse(from_date, to_date)?;
        self.report_for(range).await
    }

    /// Report for an already-validated range.
    pub async fn report_for(&self, range: ReportRange) -> Result<ParkingReport, AppError> {
        let summary = self.reports.parking_summary(&range).await?;
        let by_day = self.reports.parkings_by_day(&range).await?;
        let collected = self.reports.payments_total(&range).await?;

        debug!(
            from = %range.from,
            to = %range.to,
            total = summary.total,
            "Parking report built"
        );
        Ok(ParkingReport::build(
            range,
            self.fixed_fee,
            summary,
            by_day,
            collected,
        ))
    }
}
