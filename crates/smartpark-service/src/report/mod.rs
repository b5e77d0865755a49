//! Aggregate parking reports.

pub mod service;

pub use service::ReportService;
