//! In-memory implementation of every store trait.
//!
//! All tables live behind one Tokio mutex, so each trait method observes and
//! mutates a consistent snapshot. That makes every operation atomic and
//! serializes concurrent entries for the same slot.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use smartpark_core::error::AppError;
use smartpark_core::result::AppResult;
use smartpark_entity::car::{Car, CarDetails, NewCar};
use smartpark_entity::parking::{ParkingRecord, ParkingRecordDetail};
use smartpark_entity::payment::{NewPayment, Payment, PaymentDetail};
use smartpark_entity::report::{DailyCount, ParkingSummary, ReportRange};
use smartpark_entity::slot::{ParkingSlot, SlotStatus};
use smartpark_entity::user::{NewUser, User};

use crate::store::{
    CarStore, DeleteOutcome, EntryOutcome, ParkingStore, PaymentStore, ReportStore, SlotStore,
    UserStore,
};

#[derive(Debug, Default)]
struct Tables {
    cars: BTreeMap<String, Car>,
    slots: BTreeMap<i32, ParkingSlot>,
    records: BTreeMap<i64, ParkingRecord>,
    payments: BTreeMap<i64, Payment>,
    users: BTreeMap<i64, User>,
    last_slot: i32,
    last_record: i64,
    last_payment: i64,
    last_user: i64,
}

impl Tables {
    fn record_detail(&self, record: &ParkingRecord) -> Option<ParkingRecordDetail> {
        let car = self.cars.get(&record.plate_number)?;
        let slot = self.slots.get(&record.slot_number)?;
        Some(ParkingRecordDetail {
            record: record.clone(),
            driver_name: car.driver_name.clone(),
            phone_number: car.phone_number.clone(),
            car_type: car.car_type.clone(),
            car_size: car.car_size.clone(),
            slot_status: slot.status,
        })
    }

    fn payment_detail(&self, payment: &Payment) -> Option<PaymentDetail> {
        let car = self.cars.get(&payment.plate_number)?;
        Some(PaymentDetail {
            payment: payment.clone(),
            driver_name: car.driver_name.clone(),
            phone_number: car.phone_number.clone(),
            car_type: car.car_type.clone(),
        })
    }

    fn active_record_for_plate(&self, plate_number: &str) -> Option<&ParkingRecord> {
        self.records
            .values()
            .find(|r| r.is_active() && r.plate_number == plate_number)
    }

    fn set_slot_status(&mut self, slot_number: i32, status: SlotStatus) {
        if let Some(slot) = self.slots.get_mut(&slot_number) {
            slot.status = status;
        }
    }

    fn records_entered_in<'a>(
        &'a self,
        range: &'a ReportRange,
    ) -> impl Iterator<Item = &'a ParkingRecord> + 'a {
        self.records
            .values()
            .filter(move |r| range.contains(r.entry_time))
    }

    fn sorted_payment_details<'a>(
        &self,
        payments: impl Iterator<Item = &'a Payment>,
    ) -> Vec<PaymentDetail> {
        let mut details: Vec<PaymentDetail> =
            payments.filter_map(|p| self.payment_detail(p)).collect();
        details.sort_by(|a, b| {
            (b.payment.payment_date, b.payment.payment_number)
                .cmp(&(a.payment.payment_date, a.payment.payment_number))
        });
        details
    }
}

/// Store that keeps every table in process memory.
///
/// Cloning is cheap and clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CarStore for MemoryStore {
    async fn list_cars(&self) -> AppResult<Vec<Car>> {
        let tables = self.tables.lock().await;
        Ok(tables.cars.values().cloned().collect())
    }

    async fn find_car(&self, plate_number: &str) -> AppResult<Option<Car>> {
        let tables = self.tables.lock().await;
        Ok(tables.cars.get(plate_number).cloned())
    }

    async fn create_car(&self, car: NewCar) -> AppResult<Car> {
        let mut tables = self.tables.lock().await;
        if tables.cars.contains_key(&car.plate_number) {
            return Err(AppError::conflict(
                "A car with this plate number already exists",
            ));
        }
        let car = car.into_car(Utc::now());
        tables.cars.insert(car.plate_number.clone(), car.clone());
        Ok(car)
    }

    async fn update_car(&self, plate_number: &str, details: CarDetails) -> AppResult<Option<Car>> {
        let mut tables = self.tables.lock().await;
        Ok(tables.cars.get_mut(plate_number).map(|car| {
            car.apply(details);
            car.clone()
        }))
    }

    async fn delete_car(&self, plate_number: &str) -> AppResult<DeleteOutcome> {
        let mut tables = self.tables.lock().await;
        if !tables.cars.contains_key(plate_number) {
            return Ok(DeleteOutcome::NotFound);
        }
        let referenced = tables.records.values().any(|r| r.plate_number == plate_number)
            || tables.payments.values().any(|p| p.plate_number == plate_number);
        if referenced {
            return Ok(DeleteOutcome::InUse);
        }
        tables.cars.remove(plate_number);
        Ok(DeleteOutcome::Deleted)
    }
}

#[async_trait]
impl SlotStore for MemoryStore {
    async fn list_slots(&self, status: Option<SlotStatus>) -> AppResult<Vec<ParkingSlot>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .slots
            .values()
            .filter(|s| status.is_none_or(|wanted| s.status == wanted))
            .cloned()
            .collect())
    }

    async fn find_slot(&self, slot_number: i32) -> AppResult<Option<ParkingSlot>> {
        let tables = self.tables.lock().await;
        Ok(tables.slots.get(&slot_number).cloned())
    }

    async fn create_slot(&self) -> AppResult<ParkingSlot> {
        let mut tables = self.tables.lock().await;
        tables.last_slot += 1;
        let slot = ParkingSlot {
            slot_number: tables.last_slot,
            status: SlotStatus::Available,
            created_at: Utc::now(),
        };
        tables.slots.insert(slot.slot_number, slot.clone());
        Ok(slot)
    }

    async fn delete_slot(&self, slot_number: i32) -> AppResult<DeleteOutcome> {
        let mut tables = self.tables.lock().await;
        let Some(slot) = tables.slots.get(&slot_number) else {
            return Ok(DeleteOutcome::NotFound);
        };
        let has_history = tables.records.values().any(|r| r.slot_number == slot_number);
        if !slot.is_available() || has_history {
            return Ok(DeleteOutcome::InUse);
        }
        tables.slots.remove(&slot_number);
        Ok(DeleteOutcome::Deleted)
    }
}

#[async_trait]
impl ParkingStore for MemoryStore {
    async fn list_records(&self, active_only: bool) -> AppResult<Vec<ParkingRecordDetail>> {
        let tables = self.tables.lock().await;
        let mut details: Vec<ParkingRecordDetail> = tables
            .records
            .values()
            .filter(|r| !active_only || r.is_active())
            .filter_map(|r| tables.record_detail(r))
            .collect();
        details.sort_by(|a, b| {
            (b.record.entry_time, b.record.id).cmp(&(a.record.entry_time, a.record.id))
        });
        Ok(details)
    }

    async fn find_record(&self, id: i64) -> AppResult<Option<ParkingRecordDetail>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .records
            .get(&id)
            .and_then(|r| tables.record_detail(r)))
    }

    async fn open_record(
        &self,
        plate_number: &str,
        slot_number: i32,
        entry_time: DateTime<Utc>,
    ) -> AppResult<EntryOutcome> {
        let mut tables = self.tables.lock().await;

        if !tables.cars.contains_key(plate_number) {
            return Ok(EntryOutcome::CarNotFound);
        }
        match tables.slots.get(&slot_number) {
            None => return Ok(EntryOutcome::SlotNotFound),
            Some(slot) if !slot.is_available() => return Ok(EntryOutcome::SlotOccupied),
            Some(_) => {}
        }
        if let Some(active) = tables.active_record_for_plate(plate_number) {
            return Ok(EntryOutcome::CarAlreadyParked {
                slot_number: active.slot_number,
            });
        }

        tables.last_record += 1;
        let record = ParkingRecord {
            id: tables.last_record,
            plate_number: plate_number.to_string(),
            slot_number,
            entry_time,
            exit_time: None,
            duration: None,
        };
        tables.set_slot_status(slot_number, SlotStatus::Occupied);
        tables.records.insert(record.id, record.clone());

        debug!(id = record.id, slot_number, "Parking record opened");
        Ok(EntryOutcome::Opened(record))
    }

    async fn close_record(
        &self,
        id: i64,
        exit_time: DateTime<Utc>,
    ) -> AppResult<Option<ParkingRecord>> {
        let mut tables = self.tables.lock().await;

        let Some(record) = tables.records.get_mut(&id).filter(|r| r.is_active()) else {
            return Ok(None);
        };
        record.close(exit_time);
        let record = record.clone();
        tables.set_slot_status(record.slot_number, SlotStatus::Available);

        Ok(Some(record))
    }

    async fn remove_record(&self, id: i64) -> AppResult<Option<ParkingRecord>> {
        let mut tables = self.tables.lock().await;

        let Some(record) = tables.records.remove(&id) else {
            return Ok(None);
        };
        if record.is_active() {
            tables.set_slot_status(record.slot_number, SlotStatus::Available);
        }

        Ok(Some(record))
    }
}

#[async_trait]
impl PaymentStore for MemoryStore {
    async fn list_payments(&self) -> AppResult<Vec<PaymentDetail>> {
        let tables = self.tables.lock().await;
        Ok(tables.sorted_payment_details(tables.payments.values()))
    }

    async fn list_payments_by_plate(&self, plate_number: &str) -> AppResult<Vec<PaymentDetail>> {
        let tables = self.tables.lock().await;
        Ok(tables.sorted_payment_details(
            tables
                .payments
                .values()
                .filter(|p| p.plate_number == plate_number),
        ))
    }

    async fn find_payment(&self, payment_number: i64) -> AppResult<Option<PaymentDetail>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .payments
            .get(&payment_number)
            .and_then(|p| tables.payment_detail(p)))
    }

    async fn create_payment(&self, payment: NewPayment) -> AppResult<Payment> {
        let mut tables = self.tables.lock().await;
        if !tables.cars.contains_key(&payment.plate_number) {
            return Err(AppError::not_found("Car not found"));
        }
        tables.last_payment += 1;
        let payment = Payment {
            payment_number: tables.last_payment,
            plate_number: payment.plate_number,
            amount_paid: payment.amount_paid,
            payment_date: payment.payment_date,
        };
        tables
            .payments
            .insert(payment.payment_number, payment.clone());
        Ok(payment)
    }

    async fn update_payment(
        &self,
        payment_number: i64,
        amount_paid: i64,
    ) -> AppResult<Option<Payment>> {
        let mut tables = self.tables.lock().await;
        Ok(tables.payments.get_mut(&payment_number).map(|p| {
            p.amount_paid = amount_paid;
            p.clone()
        }))
    }

    async fn delete_payment(&self, payment_number: i64) -> AppResult<bool> {
        let mut tables = self.tables.lock().await;
        Ok(tables.payments.remove(&payment_number).is_some())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_user(&self, id: i64) -> AppResult<Option<User>> {
        let tables = self.tables.lock().await;
        Ok(tables.users.get(&id).cloned())
    }

    async fn create_user(&self, user: NewUser) -> AppResult<User> {
        let mut tables = self.tables.lock().await;
        if tables.users.values().any(|u| u.username == user.username) {
            return Err(AppError::conflict("Username already exists"));
        }
        tables.last_user += 1;
        let user = User {
            id: tables.last_user,
            username: user.username,
            password_hash: user.password_hash,
            role: user.role,
            created_at: Utc::now(),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        let tables = self.tables.lock().await;
        Ok(tables.users.values().cloned().collect())
    }
}

#[async_trait]
impl ReportStore for MemoryStore {
    async fn parking_summary(&self, range: &ReportRange) -> AppResult<ParkingSummary> {
        let tables = self.tables.lock().await;

        let mut summary = ParkingSummary::default();
        let mut closed = 0i64;
        let mut minutes = 0i64;
        for record in tables.records_entered_in(range) {
            summary.total += 1;
            match record.duration {
                Some(duration) if !record.is_active() => {
                    closed += 1;
                    minutes += i64::from(duration);
                }
                _ => summary.active += 1,
            }
        }
        if closed > 0 {
            summary.avg_duration = Some(minutes as f64 / closed as f64);
        }

        Ok(summary)
    }

    async fn parkings_by_day(&self, range: &ReportRange) -> AppResult<Vec<DailyCount>> {
        let tables = self.tables.lock().await;

        let mut by_day: BTreeMap<NaiveDate, i64> = BTreeMap::new();
        for record in tables.records_entered_in(range) {
            *by_day.entry(record.entry_time.date_naive()).or_default() += 1;
        }

        Ok(by_day
            .into_iter()
            .map(|(date, count)| DailyCount { date, count })
            .collect())
    }

    async fn payments_total(&self, range: &ReportRange) -> AppResult<i64> {
        let tables = self.tables.lock().await;
        Ok(tables
            .payments
            .values()
            .filter(|p| range.contains(p.payment_date))
            .map(|p| p.amount_paid)
            .sum())
    }
}
