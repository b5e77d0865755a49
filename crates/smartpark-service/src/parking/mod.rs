//! Parking occupancy: entry, exit, and record lifecycle.

pub mod service;

pub use service::{ExitSummary, OccupancyService};
