//! Parking payments.

pub mod service;

pub use service::PaymentService;
