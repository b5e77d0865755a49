//! Parking payment CRUD.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use smartpark_core::error::AppError;
use smartpark_database::store::{CarStore, PaymentStore};
use smartpark_entity::payment::{NewPayment, Payment, PaymentDetail};

use crate::context::RequestContext;

/// Records money received for parking.
#[derive(Debug, Clone)]
pub struct PaymentService {
    payments: Arc<dyn PaymentStore>,
    cars: Arc<dyn CarStore>,
}

impl PaymentService {
    /// Creates a new payment service.
    pub fn new(payments: Arc<dyn PaymentStore>, cars: Arc<dyn CarStore>) -> Self {
        Self { payments, cars }
    }

    pub async fn list(&self) -> Result<Vec<PaymentDetail>, AppError> {
        self.payments.list_payments().await
    }

    /// Payments of one car; an unknown plate simply has none.
    pub async fn list_by_car(&self, plate_number: &str) -> Result<Vec<PaymentDetail>, AppError> {
        self.payments.list_payments_by_plate(plate_number).await
    }

    pub async fn get(&self, payment_number: i64) -> Result<PaymentDetail, AppError> {
        self.payments
            .find_payment(payment_number)
            .await?
            .ok_or_else(|| AppError::not_found("Payment not found"))
    }

    /// Record a payment, dated now unless `payment_date` is given.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        plate_number: &str,
        amount_paid: i64,
        payment_date: Option<DateTime<Utc>>,
    ) -> Result<Payment, AppError> {
        validate_amount(amount_paid)?;
        if self.cars.find_car(plate_number).await?.is_none() {
            return Err(AppError::not_found("Car not found"));
        }

        let payment = self
            .payments
            .create_payment(NewPayment {
                plate_number: plate_number.to_string(),
                amount_paid,
                payment_date: payment_date.unwrap_or_else(Utc::now),
            })
            .await?;

        info!(
            user_id = ctx.user_id,
            payment_number = payment.payment_number,
            plate_number = %plate_number,
            amount_paid,
            "Payment recorded"
        );
        Ok(payment)
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        payment_number: i64,
        amount_paid: i64,
    ) -> Result<Payment, AppError> {
        validate_amount(amount_paid)?;
        let payment = self
            .payments
            .update_payment(payment_number, amount_paid)
            .await?
            .ok_or_else(|| AppError::not_found("Payment not found"))?;
        info!(user_id = ctx.user_id, payment_number, amount_paid, "Payment updated");
        Ok(payment)
    }

    pub async fn delete(&self, ctx: &RequestContext, payment_number: i64) -> Result<(), AppError> {
        if !self.payments.delete_payment(payment_number).await? {
            return Err(AppError::not_found("Payment not found"));
        }
        info!(user_id = ctx.user_id, payment_number, "Payment deleted");
        Ok(())
    }
}

fn validate_amount(amount_paid: i64) -> Result<(), AppError> {
    if amount_paid < 0 {
        return Err(AppError::validation("Amount paid must not be negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartpark_core::error::ErrorKind;
    use smartpark_database::MemoryStore;
    use smartpark_entity::car::{CarDetails, NewCar};

    async fn service() -> PaymentService {
        let store = MemoryStore::new();
        store
            .create_car(NewCar {
                plate_number: "RAF777G".to_string(),
                details: CarDetails {
                    driver_name: "Claude Mugisha".to_string(),
                    car_type: "Van".to_string(),
                    car_size: None,
                    phone_number: "0733000000".to_string(),
                },
            })
            .await
            .unwrap();
        PaymentService::new(Arc::new(store.clone()), Arc::new(store))
    }

    #[tokio::test]
    async fn test_create_update_delete() {
        let svc = service().await;
        let ctx = RequestContext::system();

        let payment = svc.create(&ctx, "RAF777G", 500, None).await.unwrap();
        let updated = svc.update(&ctx, payment.payment_number, 800).await.unwrap();
        assert_eq!(updated.amount_paid, 800);

        let detail = svc.get(payment.payment_number).await.unwrap();
        assert_eq!(detail.driver_name, "Claude Mugisha");
        assert_eq!(svc.list_by_car("RAF777G").await.unwrap().len(), 1);

        svc.delete(&ctx, payment.payment_number).await.unwrap();
        let err = svc.get(payment.payment_number).await.unwrap_err();
        assert_eq!(err.message, "Payment not found");
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_car_and_negative_amount() {
        let svc = service().await;
        let ctx = RequestContext::system();

        let err = svc.create(&ctx, "NOPE", 500, None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let err = svc.create(&ctx, "RAF777G", -1, None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
