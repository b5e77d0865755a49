//! Parking record repository implementation.
//!
//! Entry, exit and delete each run in one transaction. The slot row (or the
//! record row) is locked with `FOR UPDATE` before any state is checked, so
//! two sessions racing for the same slot serialize on that lock. The partial
//! unique indexes on open records back this up: a violation is reported as
//! the matching [`EntryOutcome`] instead of an error.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, warn};

use smartpark_core::result::AppResult;
use smartpark_entity::parking::{ParkingRecord, ParkingRecordDetail};
use smartpark_entity::slot::SlotStatus;

use super::{db_error, unique_violation};
use crate::store::{EntryOutcome, ParkingStore};

const ACTIVE_PLATE_INDEX: &str = "parking_records_active_plate_idx";
const ACTIVE_SLOT_INDEX: &str = "parking_records_active_slot_idx";

const DETAIL_SELECT: &str = "SELECT r.id, r.plate_number, r.slot_number, r.entry_time, \
     r.exit_time, r.duration, c.driver_name, c.phone_number, c.car_type, c.car_size, \
     s.status AS slot_status \
     FROM parking_records r \
     JOIN cars c ON c.plate_number = r.plate_number \
     JOIN parking_slots s ON s.slot_number = r.slot_number";

/// Repository for the `parking_records` table.
#[derive(Debug, Clone)]
pub struct ParkingRecordRepository {
    pool: PgPool,
}

impl ParkingRecordRepository {
    /// Create a new parking record repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn active_slot_of(&self, plate_number: &str) -> AppResult<Option<i32>> {
        sqlx::query_scalar(
            "SELECT slot_number FROM parking_records \
             WHERE plate_number = $1 AND exit_time IS NULL",
        )
        .bind(plate_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to find active parking record"))
    }
}

#[async_trait]
impl ParkingStore for ParkingRecordRepository {
    async fn list_records(&self, active_only: bool) -> AppResult<Vec<ParkingRecordDetail>> {
        let filter = if active_only {
            " WHERE r.exit_time IS NULL"
        } else {
            ""
        };
        let sql = format!("{DETAIL_SELECT}{filter} ORDER BY r.entry_time DESC, r.id DESC");

        sqlx::query_as::<_, ParkingRecordDetail>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list parking records"))
    }

    async fn find_record(&self, id: i64) -> AppResult<Option<ParkingRecordDetail>> {
        let sql = format!("{DETAIL_SELECT} WHERE r.id = $1");

        sqlx::query_as::<_, ParkingRecordDetail>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find parking record"))
    }

    async fn open_record(
        &self,
        plate_number: &str,
        slot_number: i32,
        entry_time: DateTime<Utc>,
    ) -> AppResult<EntryOutcome> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        // Share lock keeps the car from being deleted under us.
        let car: Option<String> =
            sqlx::query_scalar("SELECT plate_number FROM cars WHERE plate_number = $1 FOR SHARE")
                .bind(plate_number)
                .fetch_optional(&mut *tx)
                .await
                .map_err(db_error("Failed to lock car"))?;
        if car.is_none() {
            return Ok(EntryOutcome::CarNotFound);
        }

        let status: Option<SlotStatus> = sqlx::query_scalar(
            "SELECT status FROM parking_slots WHERE slot_number = $1 FOR UPDATE",
        )
        .bind(slot_number)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("Failed to lock parking slot"))?;
        match status {
            None => return Ok(EntryOutcome::SlotNotFound),
            Some(SlotStatus::Occupied) => return Ok(EntryOutcome::SlotOccupied),
            Some(SlotStatus::Available) => {}
        }

        let parked_in: Option<i32> = sqlx::query_scalar(
            "SELECT slot_number FROM parking_records \
             WHERE plate_number = $1 AND exit_time IS NULL",
        )
        .bind(plate_number)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("Failed to check active parking record"))?;
        if let Some(slot_number) = parked_in {
            return Ok(EntryOutcome::CarAlreadyParked { slot_number });
        }

        sqlx::query("UPDATE parking_slots SET status = $2 WHERE slot_number = $1")
            .bind(slot_number)
            .bind(SlotStatus::Occupied)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to occupy parking slot"))?;

        let inserted = sqlx::query_as::<_, ParkingRecord>(
            "INSERT INTO parking_records (plate_number, slot_number, entry_time) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(plate_number)
        .bind(slot_number)
        .bind(entry_time)
        .fetch_one(&mut *tx)
        .await;

        let record = match inserted {
            Ok(record) => record,
            Err(e) => {
                // The transaction is aborted either way; dropping it rolls back.
                drop(tx);
                let constraint = unique_violation(&e).map(str::to_owned);
                return match constraint.as_deref() {
                    Some(ACTIVE_SLOT_INDEX) => {
                        warn!(slot_number, "Lost race for parking slot");
                        Ok(EntryOutcome::SlotOccupied)
                    }
                    Some(ACTIVE_PLATE_INDEX) => {
                        warn!(plate_number = %plate_number, "Lost race parking car twice");
                        match self.active_slot_of(plate_number).await? {
                            Some(slot_number) => Ok(EntryOutcome::CarAlreadyParked { slot_number }),
                            None => Err(db_error("Failed to create parking record")(e)),
                        }
                    }
                    _ => Err(db_error("Failed to create parking record")(e)),
                };
            }
        };

        tx.commit()
            .await
            .map_err(db_error("Failed to commit parking entry"))?;

        debug!(id = record.id, slot_number, "Parking record opened");
        Ok(EntryOutcome::Opened(record))
    }

    async fn close_record(
        &self,
        id: i64,
        exit_time: DateTime<Utc>,
    ) -> AppResult<Option<ParkingRecord>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let record = sqlx::query_as::<_, ParkingRecord>(
            "SELECT * FROM parking_records WHERE id = $1 AND exit_time IS NULL FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("Failed to lock parking record"))?;
        let Some(mut record) = record else {
            return Ok(None);
        };

        let duration = record.close(exit_time);

        sqlx::query("UPDATE parking_records SET exit_time = $2, duration = $3 WHERE id = $1")
            .bind(id)
            .bind(record.exit_time)
            .bind(duration)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to close parking record"))?;

        sqlx::query("UPDATE parking_slots SET status = $2 WHERE slot_number = $1")
            .bind(record.slot_number)
            .bind(SlotStatus::Available)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to free parking slot"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit parking exit"))?;

        Ok(Some(record))
    }

    async fn remove_record(&self, id: i64) -> AppResult<Option<ParkingRecord>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let record = sqlx::query_as::<_, ParkingRecord>(
            "SELECT * FROM parking_records WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("Failed to lock parking record"))?;
        let Some(record) = record else {
            return Ok(None);
        };

        if record.is_active() {
            sqlx::query("UPDATE parking_slots SET status = $2 WHERE slot_number = $1")
                .bind(record.slot_number)
                .bind(SlotStatus::Available)
                .execute(&mut *tx)
                .await
                .map_err(db_error("Failed to free parking slot"))?;
        }

        sqlx::query("DELETE FROM parking_records WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to delete parking record"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit parking record deletion"))?;

        Ok(Some(record))
    }
}
