//! Parking slot provisioning.

pub mod service;

pub use service::SlotService;
