//! PostgreSQL implementations of the store traits.

pub mod car;
pub mod parking;
pub mod payment;
pub mod report;
pub mod slot;
pub mod user;

pub use car::CarRepository;
pub use parking::ParkingRecordRepository;
pub use payment::PaymentRepository;
pub use report::ReportRepository;
pub use slot::SlotRepository;
pub use user::UserRepository;

use smartpark_core::error::{AppError, ErrorKind};

/// Wrap a sqlx failure as a database error with context.
pub(crate) fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, context, e)
}

/// Name of the unique constraint a failed statement violated, if any.
pub(crate) fn unique_violation(err: &sqlx::Error) -> Option<&str> {
    match err {
        sqlx::Error::Database(db) if db.is_unique_violation() => db.constraint(),
        _ => None,
    }
}

/// Whether a failed statement violated a foreign key.
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}
