//! HTTP handlers grouped by resource.

pub mod auth;
pub mod car;
pub mod health;
pub mod parking;
pub mod payment;
pub mod report;
pub mod slot;
