//! Store traits shared by the PostgreSQL and in-memory backends.
//!
//! Every method that mutates more than one row is atomic: either all of its
//! writes are visible afterwards or none are.

use std::fmt::Debug;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use smartpark_core::result::AppResult;
use smartpark_entity::car::{Car, CarDetails, NewCar};
use smartpark_entity::parking::{ParkingRecord, ParkingRecordDetail};
use smartpark_entity::payment::{NewPayment, Payment, PaymentDetail};
use smartpark_entity::report::{DailyCount, ParkingSummary, ReportRange};
use smartpark_entity::slot::{ParkingSlot, SlotStatus};
use smartpark_entity::user::{NewUser, User};

/// Result of attempting to open a parking session.
///
/// Preconditions are reported in the order they are checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    /// The record was created and the slot marked occupied.
    Opened(ParkingRecord),
    /// No car with the given plate.
    CarNotFound,
    /// No slot with the given number.
    SlotNotFound,
    /// The slot already holds a car.
    SlotOccupied,
    /// The car already has an open record.
    CarAlreadyParked {
        /// Slot the car is currently in.
        slot_number: i32,
    },
}

/// Result of deleting a row other rows may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The row was removed.
    Deleted,
    /// No such row.
    NotFound,
    /// The row is still referenced and was kept.
    InUse,
}

/// Car persistence.
#[async_trait]
pub trait CarStore: Send + Sync + Debug {
    /// All cars ordered by plate number.
    async fn list_cars(&self) -> AppResult<Vec<Car>>;

    /// Look up a car by plate number.
    async fn find_car(&self, plate_number: &str) -> AppResult<Option<Car>>;

    /// Register a car. Fails with a conflict if the plate already exists.
    async fn create_car(&self, car: NewCar) -> AppResult<Car>;

    /// Replace a car's attributes; `None` if it does not exist.
    async fn update_car(&self, plate_number: &str, details: CarDetails) -> AppResult<Option<Car>>;

    /// Delete a car unless a parking record or payment references it.
    async fn delete_car(&self, plate_number: &str) -> AppResult<DeleteOutcome>;
}

/// Parking slot persistence.
#[async_trait]
pub trait SlotStore: Send + Sync + Debug {
    /// Slots ordered by number, optionally filtered by status.
    async fn list_slots(&self, status: Option<SlotStatus>) -> AppResult<Vec<ParkingSlot>>;

    /// Look up a slot by number.
    async fn find_slot(&self, slot_number: i32) -> AppResult<Option<ParkingSlot>>;

    /// Provision a new, available slot with the next free number.
    async fn create_slot(&self) -> AppResult<ParkingSlot>;

    /// Delete a slot unless it is occupied or any record references it.
    async fn delete_slot(&self, slot_number: i32) -> AppResult<DeleteOutcome>;
}

/// Parking record persistence and the slot transitions tied to it.
#[async_trait]
pub trait ParkingStore: Send + Sync + Debug {
    /// Records newest entry first, optionally only open ones.
    async fn list_records(&self, active_only: bool) -> AppResult<Vec<ParkingRecordDetail>>;

    /// Look up one record with its car and slot details.
    async fn find_record(&self, id: i64) -> AppResult<Option<ParkingRecordDetail>>;

    /// Open a session: mark the slot occupied and insert the record.
    async fn open_record(
        &self,
        plate_number: &str,
        slot_number: i32,
        entry_time: DateTime<Utc>,
    ) -> AppResult<EntryOutcome>;

    /// Close an open session and free its slot; `None` if no open record has this id.
    async fn close_record(&self, id: i64, exit_time: DateTime<Utc>)
    -> AppResult<Option<ParkingRecord>>;

    /// Delete a record, freeing its slot first if the session is still open.
    async fn remove_record(&self, id: i64) -> AppResult<Option<ParkingRecord>>;
}

/// Parking payment persistence.
#[async_trait]
pub trait PaymentStore: Send + Sync + Debug {
    /// All payments, most recent first.
    async fn list_payments(&self) -> AppResult<Vec<PaymentDetail>>;

    /// Payments of one car, most recent first.
    async fn list_payments_by_plate(&self, plate_number: &str) -> AppResult<Vec<PaymentDetail>>;

    /// Look up a payment by number.
    async fn find_payment(&self, payment_number: i64) -> AppResult<Option<PaymentDetail>>;

    /// Record a payment. Fails with not-found if the car does not exist.
    async fn create_payment(&self, payment: NewPayment) -> AppResult<Payment>;

    /// Change the amount of a payment; `None` if it does not exist.
    async fn update_payment(&self, payment_number: i64, amount_paid: i64)
    -> AppResult<Option<Payment>>;

    /// Delete a payment; `false` if it does not exist.
    async fn delete_payment(&self, payment_number: i64) -> AppResult<bool>;
}

/// User account persistence.
#[async_trait]
pub trait UserStore: Send + Sync + Debug {
    /// Look up a user by exact username.
    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Look up a user by id.
    async fn find_user(&self, id: i64) -> AppResult<Option<User>>;

    /// Create a user. Fails with a conflict if the username is taken.
    async fn create_user(&self, user: NewUser) -> AppResult<User>;

    /// All users ordered by id.
    async fn list_users(&self) -> AppResult<Vec<User>>;
}

/// Read-only aggregates over a date range.
#[async_trait]
pub trait ReportStore: Send + Sync + Debug {
    /// Counts and mean duration of the records entered in range.
    async fn parking_summary(&self, range: &ReportRange) -> AppResult<ParkingSummary>;

    /// Records entered in range grouped by UTC day, ascending.
    async fn parkings_by_day(&self, range: &ReportRange) -> AppResult<Vec<DailyCount>>;

    /// Sum of payments dated in range.
    async fn payments_total(&self, range: &ReportRange) -> AppResult<i64>;
}
