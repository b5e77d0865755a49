//! Occupancy service. The only writer of slot status.
//!
//! Every state change goes through one atomic store call; this layer turns
//! the store outcome into the error a caller sees.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use smartpark_core::error::AppError;
use smartpark_database::store::{EntryOutcome, ParkingStore};
use smartpark_entity::parking::{ParkingRecord, ParkingRecordDetail};

use crate::context::RequestContext;

/// Result of registering an exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitSummary {
    /// Closed record.
    pub id: i64,
    /// Session length in whole minutes.
    pub duration: i32,
}

/// Registers car entries and exits against parking slots.
#[derive(Debug, Clone)]
pub struct OccupancyService {
    records: Arc<dyn ParkingStore>,
}

impl OccupancyService {
    /// Creates a new occupancy service.
    pub fn new(records: Arc<dyn ParkingStore>) -> Self {
        Self { records }
    }

    /// Park `plate_number` in `slot_number` now.
    pub async fn register_entry(
        &self,
        ctx: &RequestContext,
        plate_number: &str,
        slot_number: i32,
    ) -> Result<ParkingRecord, AppError> {
        let outcome = self
            .records
            .open_record(plate_number, slot_number, Utc::now())
            .await?;

        match outcome {
            EntryOutcome::Opened(record) => {
                info!(
                    user_id = ctx.user_id,
                    record_id = record.id,
                    plate_number = %plate_number,
                    slot_number,
                    "Car entered"
                );
                Ok(record)
            }
            EntryOutcome::CarNotFound => Err(AppError::not_found("Car not found")),
            EntryOutcome::SlotNotFound => Err(AppError::not_found("Parking slot not found")),
            EntryOutcome::SlotOccupied => {
                warn!(slot_number, plate_number = %plate_number, "Entry refused: slot occupied");
                Err(AppError::conflict("Parking slot is already occupied"))
            }
            EntryOutcome::CarAlreadyParked { slot_number } => Err(AppError::conflict(format!(
                "This car is already parked in slot {slot_number}"
            ))),
        }
    }

    /// Close the open record `id` now and free its slot.
    pub async fn register_exit(
        &self,
        ctx: &RequestContext,
        id: i64,
    ) -> Result<ExitSummary, AppError> {
        let record = self
            .records
            .close_record(id, Utc::now())
            .await?
            .ok_or_else(|| AppError::not_found("Active parking record not found"))?;

        let duration = record.duration.unwrap_or_default();
        info!(
            user_id = ctx.user_id,
            record_id = id,
            slot_number = record.slot_number,
            duration,
            "Car exited"
        );

        Ok(ExitSummary { id, duration })
    }

    /// Delete record `id`, freeing its slot if the car is still parked.
    pub async fn delete_record(&self, ctx: &RequestContext, id: i64) -> Result<(), AppError> {
        let record = self
            .records
            .remove_record(id)
            .await?
            .ok_or_else(|| AppError::not_found("Parking record not found"))?;

        info!(
            user_id = ctx.user_id,
            record_id = id,
            was_active = record.is_active(),
            "Parking record deleted"
        );
        Ok(())
    }

    /// All records, newest entry first.
    pub async fn list(&self) -> Result<Vec<ParkingRecordDetail>, AppError> {
        self.records.list_records(false).await
    }

    /// Records of cars still parked.
    pub async fn list_active(&self) -> Result<Vec<ParkingRecordDetail>, AppError> {
        self.records.list_records(true).await
    }

    /// One record by id.
    pub async fn get(&self, id: i64) -> Result<ParkingRecordDetail, AppError> {
        self.records
            .find_record(id)
            .await?
            .ok_or_else(|| AppError::not_found("Parking record not found"))
    }
}
