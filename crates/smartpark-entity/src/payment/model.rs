//! Parking payment entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Money received for parking, tied to a car but not to a specific session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Auto-incrementing payment number.
    pub payment_number: i64,
    /// Paying car.
    pub plate_number: String,
    /// Amount in whole currency units.
    pub amount_paid: i64,
    /// When the payment was taken.
    pub payment_date: DateTime<Utc>,
}

/// A payment joined with the paying car's driver details.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetail {
    /// The payment itself.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub payment: Payment,
    /// Driver's name.
    pub driver_name: String,
    /// Driver's phone number.
    pub phone_number: String,
    /// Car type.
    pub car_type: String,
}

/// Data required to record a payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    /// Paying car.
    pub plate_number: String,
    /// Amount in whole currency units.
    pub amount_paid: i64,
    /// Payment time.
    pub payment_date: DateTime<Utc>,
}
