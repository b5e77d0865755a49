//! Parking slot provisioning and lookup.
//!
//! Slot status is read here but only ever written by the occupancy service.

use std::sync::Arc;

use tracing::info;

use smartpark_core::error::AppError;
use smartpark_database::store::{DeleteOutcome, SlotStore};
use smartpark_entity::slot::{ParkingSlot, SlotStatus};

use crate::context::RequestContext;

/// Provisions and lists parking slots.
#[derive(Debug, Clone)]
pub struct SlotService {
    slots: Arc<dyn SlotStore>,
}

impl SlotService {
    /// Creates a new slot service.
    pub fn new(slots: Arc<dyn SlotStore>) -> Self {
        Self { slots }
    }

    /// Slots ordered by number, optionally only those in `status`.
    pub async fn list(&self, status: Option<SlotStatus>) -> Result<Vec<ParkingSlot>, AppError> {
        self.slots.list_slots(status).await
    }

    pub async fn get(&self, slot_number: i32) -> Result<ParkingSlot, AppError> {
        self.slots
            .find_slot(slot_number)
            .await?
            .ok_or_else(|| AppError::not_found("Parking slot not found"))
    }

    /// Add one slot; new slots always start available.
    pub async fn create(&self, ctx: &RequestContext) -> Result<ParkingSlot, AppError> {
        let slot = self.slots.create_slot().await?;
        info!(user_id = ctx.user_id, slot_number = slot.slot_number, "Parking slot added");
        Ok(slot)
    }

    /// Add `count` slots in one go.
    pub async fn create_many(
        &self,
        ctx: &RequestContext,
        count: u32,
    ) -> Result<Vec<ParkingSlot>, AppError> {
        if count == 0 {
            return Err(AppError::validation("Slot count must be at least 1"));
        }
        let mut created = Vec::with_capacity(count as usize);
        for _ in 0..count {
            created.push(self.slots.create_slot().await?);
        }
        info!(user_id = ctx.user_id, count, "Parking slots provisioned");
        Ok(created)
    }

    /// Remove a slot that is free and has never been used.
    pub async fn delete(&self, ctx: &RequestContext, slot_number: i32) -> Result<(), AppError> {
        match self.slots.delete_slot(slot_number).await? {
            DeleteOutcome::Deleted => {
                info!(user_id = ctx.user_id, slot_number, "Parking slot deleted");
                Ok(())
            }
            DeleteOutcome::NotFound => Err(AppError::not_found("Parking slot not found")),
            DeleteOutcome::InUse => Err(AppError::conflict(
                "Cannot delete parking slot that is in use or has parking history",
            )),
        }
    }
}
