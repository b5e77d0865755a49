//! Parking payment repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use smartpark_core::error::AppError;
use smartpark_core::result::AppResult;
use smartpark_entity::payment::{NewPayment, Payment, PaymentDetail};

use super::{db_error, is_foreign_key_violation};
use crate::store::PaymentStore;

const DETAIL_SELECT: &str = "SELECT p.payment_number, p.plate_number, p.amount_paid, \
     p.payment_date, c.driver_name, c.phone_number, c.car_type \
     FROM ps_payments p \
     JOIN cars c ON c.plate_number = p.plate_number";

/// Repository for the `ps_payments` table.
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    /// Create a new payment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentStore for PaymentRepository {
    async fn list_payments(&self) -> AppResult<Vec<PaymentDetail>> {
        let sql = format!("{DETAIL_SELECT} ORDER BY p.payment_date DESC, p.payment_number DESC");

        sqlx::query_as::<_, PaymentDetail>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list payments"))
    }

    async fn list_payments_by_plate(&self, plate_number: &str) -> AppResult<Vec<PaymentDetail>> {
        let sql = format!(
            "{DETAIL_SELECT} WHERE p.plate_number = $1 \
             ORDER BY p.payment_date DESC, p.payment_number DESC"
        );

        sqlx::query_as::<_, PaymentDetail>(&sql)
            .bind(plate_number)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list payments for car"))
    }

    async fn find_payment(&self, payment_number: i64) -> AppResult<Option<PaymentDetail>> {
        let sql = format!("{DETAIL_SELECT} WHERE p.payment_number = $1");

        sqlx::query_as::<_, PaymentDetail>(&sql)
            .bind(payment_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find payment"))
    }

    async fn create_payment(&self, payment: NewPayment) -> AppResult<Payment> {
        sqlx::query_as::<_, Payment>(
            "INSERT INTO ps_payments (plate_number, amount_paid, payment_date) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&payment.plate_number)
        .bind(payment.amount_paid)
        .bind(payment.payment_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                AppError::not_found("Car not found")
            } else {
                db_error("Failed to create payment")(e)
            }
        })
    }

    async fn update_payment(
        &self,
        payment_number: i64,
        amount_paid: i64,
    ) -> AppResult<Option<Payment>> {
        sqlx::query_as::<_, Payment>(
            "UPDATE ps_payments SET amount_paid = $2 WHERE payment_number = $1 RETURNING *",
        )
        .bind(payment_number)
        .bind(amount_paid)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update payment"))
    }

    async fn delete_payment(&self, payment_number: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM ps_payments WHERE payment_number = $1")
            .bind(payment_number)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete payment"))?;
        Ok(result.rows_affected() > 0)
    }
}
