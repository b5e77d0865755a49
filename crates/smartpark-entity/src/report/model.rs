//! Report date range and aggregate shapes.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use smartpark_core::{AppError, AppResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// An inclusive range of calendar days, interpreted in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRange {
    /// First day of the range.
    pub from: NaiveDate,
    /// Last day of the range.
    pub to: NaiveDate,
}

impl ReportRange {
    /// Parse `YYYY-MM-DD` query values into a range.
    pub fn parse(from: Option<&str>, to: Option<&str>) -> AppResult<Self> {
        let (Some(from), Some(to)) = (non_empty(from), non_empty(to)) else {
            return Err(AppError::validation("From date and to date are required"));
        };

        let from = parse_date(from)?;
        let to = parse_date(to)?;
        if from > to {
            return Err(AppError::validation("From date must not be after to date"));
        }

        Ok(Self { from, to })
    }

    /// Midnight at the start of `from`.
    pub fn start(&self) -> DateTime<Utc> {
        self.from.and_time(NaiveTime::MIN).and_utc()
    }

    /// Midnight after `to`; the range covers everything strictly before it.
    pub fn end_exclusive(&self) -> DateTime<Utc> {
        let next = self.to.checked_add_days(Days::new(1)).unwrap_or(NaiveDate::MAX);
        next.and_time(NaiveTime::MIN).and_utc()
    }

    /// Check if an instant falls inside the range.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start() && at < self.end_exclusive()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_date(value: &str) -> AppResult<NaiveDate> {
    // chrono accepts unpadded fields; the wire format is strictly 10 chars.
    if value.len() != 10 {
        return Err(AppError::validation("Invalid date format. Use YYYY-MM-DD"));
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| AppError::validation("Invalid date format. Use YYYY-MM-DD"))
}

/// Counts over the records whose entry time falls in a range.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParkingSummary {
    /// Records entered in range.
    pub total: i64,
    /// Of those, still open.
    pub active: i64,
    /// Mean duration of the closed ones, if any.
    pub avg_duration: Option<f64>,
}

impl ParkingSummary {
    /// Records that have been closed.
    pub fn completed(&self) -> i64 {
        self.total - self.active
    }
}

/// Number of entries on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DailyCount {
    /// The day.
    pub date: NaiveDate,
    /// Entries that day.
    pub count: i64,
}

/// Aggregate parking report returned to staff.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingReport {
    pub fixed_parking_fee: i64,
    pub total_parkings: i64,
    pub active_parking: i64,
    pub completed_parkings: i64,
    pub avg_duration: f64,
    /// Fee-based estimate for cars still parked.
    pub current_revenue: i64,
    /// Payments actually received in the range.
    pub collected_revenue: i64,
    pub parkings_by_day: Vec<DailyCount>,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}

impl ParkingReport {
    /// Assemble a report from the store aggregates.
    pub fn build(
        range: ReportRange,
        fixed_fee: i64,
        summary: ParkingSummary,
        parkings_by_day: Vec<DailyCount>,
        collected_revenue: i64,
    ) -> Self {
        Self {
            fixed_parking_fee: fixed_fee,
            total_parkings: summary.total,
            active_parking: summary.active,
            completed_parkings: summary.completed(),
            avg_duration: summary.avg_duration.unwrap_or(0.0),
            current_revenue: summary.active * fixed_fee,
            collected_revenue,
            parkings_by_day,
            from_date: range.from,
            to_date: range.to,
        }
    }
}
