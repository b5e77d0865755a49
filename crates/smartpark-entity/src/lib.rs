//! # smartpark-entity
//!
//! Domain entity models for SmartPark. Every struct in this crate represents
//! a database table row or a domain value object. Table rows additionally
//! derive `sqlx::FromRow`.

pub mod car;
pub mod parking;
pub mod payment;
pub mod report;
pub mod slot;
pub mod user;
