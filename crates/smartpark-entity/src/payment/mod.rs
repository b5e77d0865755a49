//! Parking payment domain entities.

pub mod model;

pub use model::{NewPayment, Payment, PaymentDetail};
