//! Parking slot entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::SlotStatus;

/// A physical parking space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ParkingSlot {
    /// Unique slot number.
    pub slot_number: i32,
    /// Current occupancy.
    pub status: SlotStatus,
    /// When the slot was provisioned.
    pub created_at: DateTime<Utc>,
}

impl ParkingSlot {
    /// Check if a car can be parked here right now.
    pub fn is_available(&self) -> bool {
        self.status == SlotStatus::Available
    }
}
