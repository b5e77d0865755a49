//! Reporting value objects.

pub mod model;

pub use model::{DailyCount, ParkingReport, ParkingSummary, ReportRange};
