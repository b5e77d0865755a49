//! Parking record domain entities.

pub mod model;

pub use model::{ParkingRecord, ParkingRecordDetail, elapsed_minutes};
