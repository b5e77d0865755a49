//! Parking slot domain entities.

pub mod model;
pub mod status;

pub use model::ParkingSlot;
pub use status::SlotStatus;
