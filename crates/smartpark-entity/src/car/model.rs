//! Car entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered car, keyed by its plate number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    /// Unique plate number.
    pub plate_number: String,
    /// Driver's full name.
    pub driver_name: String,
    /// Car type (e.g. sedan, SUV).
    pub car_type: String,
    /// Car size, if recorded.
    pub car_size: Option<String>,
    /// Driver's phone number.
    pub phone_number: String,
    /// When the car was registered.
    pub created_at: DateTime<Utc>,
}

/// The mutable attributes of a car.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarDetails {
    /// Driver's full name.
    pub driver_name: String,
    /// Car type.
    pub car_type: String,
    /// Car size.
    pub car_size: Option<String>,
    /// Driver's phone number.
    pub phone_number: String,
}

/// Data required to register a car.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCar {
    /// Plate number (primary key).
    pub plate_number: String,
    /// Remaining attributes.
    pub details: CarDetails,
}

impl NewCar {
    /// Build the row this request creates at `created_at`.
    pub fn into_car(self, created_at: DateTime<Utc>) -> Car {
        Car {
            plate_number: self.plate_number,
            driver_name: self.details.driver_name,
            car_type: self.details.car_type,
            car_size: self.details.car_size,
            phone_number: self.details.phone_number,
            created_at,
        }
    }
}

impl Car {
    /// Replace the mutable attributes.
    pub fn apply(&mut self, details: CarDetails) {
        self.driver_name = details.driver_name;
        self.car_type = details.car_type;
        self.car_size = details.car_size;
        self.phone_number = details.phone_number;
    }
}
