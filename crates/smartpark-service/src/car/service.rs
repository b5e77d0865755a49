//! Car CRUD.

use std::sync::Arc;

use tracing::info;

use smartpark_core::error::AppError;
use smartpark_database::store::{CarStore, DeleteOutcome};
use smartpark_entity::car::{Car, CarDetails, NewCar};

use crate::context::RequestContext;

/// Registers and maintains cars.
#[derive(Debug, Clone)]
pub struct CarService {
    cars: Arc<dyn CarStore>,
}

impl CarService {
    /// Creates a new car service.
    pub fn new(cars: Arc<dyn CarStore>) -> Self {
        Self { cars }
    }

    pub async fn list(&self) -> Result<Vec<Car>, AppError> {
        self.cars.list_cars().await
    }

    pub async fn get(&self, plate_number: &str) -> Result<Car, AppError> {
        self.cars
            .find_car(plate_number)
            .await?
            .ok_or_else(|| AppError::not_found("Car not found"))
    }

    /// Register a car under its trimmed plate number.
    pub async fn create(&self, ctx: &RequestContext, mut car: NewCar) -> Result<Car, AppError> {
        car.plate_number = car.plate_number.trim().to_string();
        if car.plate_number.is_empty() {
            return Err(AppError::validation("Plate number is required"));
        }
        let car = self.cars.create_car(car).await?;
        info!(user_id = ctx.user_id, plate_number = %car.plate_number, "Car registered");
        Ok(car)
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        plate_number: &str,
        details: CarDetails,
    ) -> Result<Car, AppError> {
        let car = self
            .cars
            .update_car(plate_number, details)
            .await?
            .ok_or_else(|| AppError::not_found("Car not found"))?;
        info!(user_id = ctx.user_id, plate_number = %plate_number, "Car updated");
        Ok(car)
    }

    /// Delete a car that has never parked or paid.
    pub async fn delete(&self, ctx: &RequestContext, plate_number: &str) -> Result<(), AppError> {
        match self.cars.delete_car(plate_number).await? {
            DeleteOutcome::Deleted => {
                info!(user_id = ctx.user_id, plate_number = %plate_number, "Car deleted");
                Ok(())
            }
            DeleteOutcome::NotFound => Err(AppError::not_found("Car not found")),
            DeleteOutcome::InUse => Err(AppError::conflict(
                "Cannot delete car with existing parking records or payments",
            )),
        }
    }
}
