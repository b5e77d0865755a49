//! Car repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use smartpark_core::error::AppError;
use smartpark_core::result::AppResult;
use smartpark_entity::car::{Car, CarDetails, NewCar};

use super::{db_error, is_foreign_key_violation, unique_violation};
use crate::store::{CarStore, DeleteOutcome};

/// Repository for the `cars` table.
#[derive(Debug, Clone)]
pub struct CarRepository {
    pool: PgPool,
}

impl CarRepository {
    /// Create a new car repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CarStore for CarRepository {
    async fn list_cars(&self) -> AppResult<Vec<Car>> {
        sqlx::query_as::<_, Car>("SELECT * FROM cars ORDER BY plate_number")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list cars"))
    }

    async fn find_car(&self, plate_number: &str) -> AppResult<Option<Car>> {
        sqlx::query_as::<_, Car>("SELECT * FROM cars WHERE plate_number = $1")
            .bind(plate_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find car"))
    }

    async fn create_car(&self, car: NewCar) -> AppResult<Car> {
        sqlx::query_as::<_, Car>(
            "INSERT INTO cars (plate_number, driver_name, car_type, car_size, phone_number) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(&car.plate_number)
        .bind(&car.details.driver_name)
        .bind(&car.details.car_type)
        .bind(&car.details.car_size)
        .bind(&car.details.phone_number)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if unique_violation(&e).is_some() {
                AppError::conflict("A car with this plate number already exists")
            } else {
                db_error("Failed to create car")(e)
            }
        })
    }

    async fn update_car(&self, plate_number: &str, details: CarDetails) -> AppResult<Option<Car>> {
        sqlx::query_as::<_, Car>(
            "UPDATE cars SET driver_name = $2, car_type = $3, car_size = $4, phone_number = $5 \
             WHERE plate_number = $1 RETURNING *",
        )
        .bind(plate_number)
        .bind(&details.driver_name)
        .bind(&details.car_type)
        .bind(&details.car_size)
        .bind(&details.phone_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update car"))
    }

    async fn delete_car(&self, plate_number: &str) -> AppResult<DeleteOutcome> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let locked: Option<String> =
            sqlx::query_scalar("SELECT plate_number FROM cars WHERE plate_number = $1 FOR UPDATE")
                .bind(plate_number)
                .fetch_optional(&mut *tx)
                .await
                .map_err(db_error("Failed to lock car"))?;
        if locked.is_none() {
            return Ok(DeleteOutcome::NotFound);
        }

        let referenced: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM parking_records WHERE plate_number = $1) \
             OR EXISTS (SELECT 1 FROM ps_payments WHERE plate_number = $1)",
        )
        .bind(plate_number)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error("Failed to check car references"))?;
        if referenced {
            debug!(plate_number = %plate_number, "Car still referenced, not deleting");
            return Ok(DeleteOutcome::InUse);
        }

        let deleted = sqlx::query("DELETE FROM cars WHERE plate_number = $1")
            .bind(plate_number)
            .execute(&mut *tx)
            .await;
        match deleted {
            Ok(_) => {}
            Err(e) if is_foreign_key_violation(&e) => return Ok(DeleteOutcome::InUse),
            Err(e) => return Err(db_error("Failed to delete car")(e)),
        }

        tx.commit()
            .await
            .map_err(db_error("Failed to commit car deletion"))?;
        Ok(DeleteOutcome::Deleted)
    }
}
