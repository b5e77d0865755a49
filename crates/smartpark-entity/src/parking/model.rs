//! Parking record entity model and session arithmetic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::slot::SlotStatus;

/// One entry-to-exit session of a car occupying a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ParkingRecord {
    /// Auto-incrementing record identifier.
    pub id: i64,
    /// Parked car.
    pub plate_number: String,
    /// Occupied slot.
    pub slot_number: i32,
    /// When the car entered.
    pub entry_time: DateTime<Utc>,
    /// When the car left; `None` while the session is open.
    pub exit_time: Option<DateTime<Utc>>,
    /// Session length in whole minutes, set at exit.
    pub duration: Option<i32>,
}

impl ParkingRecord {
    /// Check if the car is still parked.
    pub fn is_active(&self) -> bool {
        self.exit_time.is_none()
    }

    /// Close the session at `exit_time` and return the recorded duration.
    ///
    /// An exit earlier than the entry (a clock stepping back) is recorded
    /// as the entry time itself.
    pub fn close(&mut self, exit_time: DateTime<Utc>) -> i32 {
        let exit_time = exit_time.max(self.entry_time);
        let duration = elapsed_minutes(self.entry_time, exit_time);
        self.exit_time = Some(exit_time);
        self.duration = Some(duration);
        duration
    }
}

/// A parking record joined with its car and slot, as listed to staff.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ParkingRecordDetail {
    /// The record itself.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub record: ParkingRecord,
    /// Driver's name.
    pub driver_name: String,
    /// Driver's phone number.
    pub phone_number: String,
    /// Car type.
    pub car_type: String,
    /// Car size.
    pub car_size: Option<String>,
    /// Current status of the slot the record points at.
    pub slot_status: SlotStatus,
}

/// Whole minutes between `entry` and `exit`, truncated toward zero.
///
/// A clock that steps backwards yields 0 rather than a negative duration.
pub fn elapsed_minutes(entry: DateTime<Utc>, exit: DateTime<Utc>) -> i32 {
    let minutes = (exit - entry).num_minutes().max(0);
    i32::try_from(minutes).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, h, m, s).unwrap()
    }

    #[test]
    fn test_elapsed_minutes_truncates_seconds() {
        assert_eq!(elapsed_minutes(at(10, 0, 0), at(10, 5, 30)), 5);
        assert_eq!(elapsed_minutes(at(10, 0, 0), at(10, 0, 59)), 0);
        assert_eq!(elapsed_minutes(at(10, 0, 0), at(12, 1, 0)), 121);
    }

    #[test]
    fn test_elapsed_minutes_never_negative() {
        assert_eq!(elapsed_minutes(at(10, 5, 0), at(10, 0, 0)), 0);
    }

    #[test]
    fn test_close_before_entry_clamps_exit() {
        let mut record = ParkingRecord {
            id: 2,
            plate_number: "RAB123A".to_string(),
            slot_number: 1,
            entry_time: at(9, 0, 0),
            exit_time: None,
            duration: None,
        };

        assert_eq!(record.close(at(8, 59, 0)), 0);
        assert_eq!(record.exit_time, Some(at(9, 0, 0)));
    }

    #[test]
    fn test_close_sets_exit_and_duration() {
        let mut record = ParkingRecord {
            id: 1,
            plate_number: "RAB123A".to_string(),
            slot_number: 3,
            entry_time: at(9, 0, 0),
            exit_time: None,
            duration: None,
        };
        assert!(record.is_active());

        let duration = record.close(at(9, 45, 10));

        assert_eq!(duration, 45);
        assert_eq!(record.duration, Some(45));
        assert_eq!(record.exit_time, Some(at(9, 45, 10)));
        assert!(!record.is_active());
    }
}
