//! Car registry.

pub mod service;

pub use service::CarService;
