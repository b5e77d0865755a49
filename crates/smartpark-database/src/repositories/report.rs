//! Report aggregate queries.

use async_trait::async_trait;
use sqlx::PgPool;

use smartpark_core::result::AppResult;
use smartpark_entity::report::{DailyCount, ParkingSummary, ReportRange};

use super::db_error;
use crate::store::ReportStore;

/// Read-only aggregate queries over records and payments.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    /// Create a new report repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportStore for ReportRepository {
    async fn parking_summary(&self, range: &ReportRange) -> AppResult<ParkingSummary> {
        let (total, active, avg_duration): (i64, i64, Option<f64>) = sqlx::query_as(
            "SELECT COUNT(*), \
                    COUNT(*) FILTER (WHERE exit_time IS NULL), \
                    (AVG(duration) FILTER (WHERE exit_time IS NOT NULL))::float8 \
             FROM parking_records \
             WHERE entry_time >= $1 AND entry_time < $2",
        )
        .bind(range.start())
        .bind(range.end_exclusive())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to summarize parking records"))?;

        Ok(ParkingSummary {
            total,
            active,
            avg_duration,
        })
    }

    async fn parkings_by_day(&self, range: &ReportRange) -> AppResult<Vec<DailyCount>> {
        sqlx::query_as::<_, DailyCount>(
            "SELECT (entry_time AT TIME ZONE 'UTC')::date AS date, COUNT(*) AS count \
             FROM parking_records \
             WHERE entry_time >= $1 AND entry_time < $2 \
             GROUP BY 1 ORDER BY 1",
        )
        .bind(range.start())
        .bind(range.end_exclusive())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to count parking records by day"))
    }

    async fn payments_total(&self, range: &ReportRange) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount_paid), 0)::int8 FROM ps_payments \
             WHERE payment_date >= $1 AND payment_date < $2",
        )
        .bind(range.start())
        .bind(range.end_exclusive())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to sum payments"))
    }
}
