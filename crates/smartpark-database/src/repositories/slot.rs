//! Parking slot repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use smartpark_core::result::AppResult;
use smartpark_entity::slot::{ParkingSlot, SlotStatus};

use super::{db_error, is_foreign_key_violation};
use crate::store::{DeleteOutcome, SlotStore};

/// Repository for the `parking_slots` table.
#[derive(Debug, Clone)]
pub struct SlotRepository {
    pool: PgPool,
}

impl SlotRepository {
    /// Create a new slot repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SlotStore for SlotRepository {
    async fn list_slots(&self, status: Option<SlotStatus>) -> AppResult<Vec<ParkingSlot>> {
        match status {
            Some(status) => sqlx::query_as::<_, ParkingSlot>(
                "SELECT * FROM parking_slots WHERE status = $1 ORDER BY slot_number",
            )
            .bind(status)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list parking slots by status")),
            None => {
                sqlx::query_as::<_, ParkingSlot>("SELECT * FROM parking_slots ORDER BY slot_number")
                    .fetch_all(&self.pool)
                    .await
                    .map_err(db_error("Failed to list parking slots"))
            }
        }
    }

    async fn find_slot(&self, slot_number: i32) -> AppResult<Option<ParkingSlot>> {
        sqlx::query_as::<_, ParkingSlot>("SELECT * FROM parking_slots WHERE slot_number = $1")
            .bind(slot_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find parking slot"))
    }

    async fn create_slot(&self) -> AppResult<ParkingSlot> {
        sqlx::query_as::<_, ParkingSlot>(
            "INSERT INTO parking_slots (status) VALUES ($1) RETURNING *",
        )
        .bind(SlotStatus::Available)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to create parking slot"))
    }

    async fn delete_slot(&self, slot_number: i32) -> AppResult<DeleteOutcome> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let status: Option<SlotStatus> = sqlx::query_scalar(
            "SELECT status FROM parking_slots WHERE slot_number = $1 FOR UPDATE",
        )
        .bind(slot_number)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("Failed to lock parking slot"))?;

        match status {
            None => return Ok(DeleteOutcome::NotFound),
            Some(SlotStatus::Occupied) => return Ok(DeleteOutcome::InUse),
            Some(SlotStatus::Available) => {}
        }

        let has_history: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM parking_records WHERE slot_number = $1)",
        )
        .bind(slot_number)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error("Failed to check parking slot history"))?;
        if has_history {
            return Ok(DeleteOutcome::InUse);
        }

        let deleted = sqlx::query("DELETE FROM parking_slots WHERE slot_number = $1")
            .bind(slot_number)
            .execute(&mut *tx)
            .await;
        match deleted {
            Ok(_) => {}
            Err(e) if is_foreign_key_violation(&e) => return Ok(DeleteOutcome::InUse),
            Err(e) => return Err(db_error("Failed to delete parking slot")(e)),
        }

        tx.commit()
            .await
            .map_err(db_error("Failed to commit parking slot deletion"))?;
        Ok(DeleteOutcome::Deleted)
    }
}
