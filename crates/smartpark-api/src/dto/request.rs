//! Request DTOs with validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use smartpark_entity::car::{CarDetails, NewCar};

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 50, message = "Username must be 1-50 characters"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Requested role; `admin` is never granted here.
    pub role: Option<String>,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Car registration body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCarRequest {
    #[validate(length(min = 1, max = 20, message = "Plate number must be 1-20 characters"))]
    pub plate_number: String,
    #[validate(length(min = 1, max = 100, message = "Driver name is required"))]
    pub driver_name: String,
    #[validate(length(min = 1, max = 50, message = "Car type is required"))]
    pub car_type: String,
    #[validate(length(max = 20))]
    pub car_size: Option<String>,
    #[validate(length(min = 1, max = 20, message = "Phone number is required"))]
    pub phone_number: String,
}

impl From<CreateCarRequest> for NewCar {
    fn from(req: CreateCarRequest) -> Self {
        NewCar {
            plate_number: req.plate_number,
            details: CarDetails {
                driver_name: req.driver_name,
                car_type: req.car_type,
                car_size: req.car_size,
                phone_number: req.phone_number,
            },
        }
    }
}

/// Car update body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCarRequest {
    #[validate(length(min = 1, max = 100, message = "Driver name is required"))]
    pub driver_name: String,
    #[validate(length(min = 1, max = 50, message = "Car type is required"))]
    pub car_type: String,
    #[validate(length(max = 20))]
    pub car_size: Option<String>,
    #[validate(length(min = 1, max = 20, message = "Phone number is required"))]
    pub phone_number: String,
}

impl From<UpdateCarRequest> for CarDetails {
    fn from(req: UpdateCarRequest) -> Self {
        CarDetails {
            driver_name: req.driver_name,
            car_type: req.car_type,
            car_size: req.car_size,
            phone_number: req.phone_number,
        }
    }
}

/// Car entry body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ParkingEntryRequest {
    #[validate(length(min = 1, message = "Plate number is required"))]
    pub plate_number: String,
    #[validate(range(min = 1, message = "Slot number must be positive"))]
    pub slot_number: i32,
}

/// Payment creation body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    #[validate(length(min = 1, message = "Plate number is required"))]
    pub plate_number: String,
    #[validate(range(min = 0, message = "Amount paid must not be negative"))]
    pub amount_paid: i64,
    /// Defaults to now.
    pub payment_date: Option<DateTime<Utc>>,
}

/// Payment update body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentRequest {
    #[validate(range(min = 0, message = "Amount paid must not be negative"))]
    pub amount_paid: i64,
}

/// Report query string; both values are checked by the report service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}
