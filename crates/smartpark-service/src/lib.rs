//! # smartpark-service
//!
//! Business logic service layer for SmartPark. Each service orchestrates the
//! store traits from `smartpark-database` to implement one group of use
//! cases and turns store outcomes into typed [`AppError`]s.
//!
//! Services follow constructor injection; stores arrive as `Arc<dyn …>`.
//!
//! [`AppError`]: smartpark_core::AppError

pub mod auth;
pub mod car;
pub mod context;
pub mod parking;
pub mod payment;
pub mod report;
pub mod slot;

pub use auth::{AuthService, LoginResult};
pub use car::CarService;
pub use context::RequestContext;
pub use parking::{ExitSummary, OccupancyService};
pub use payment::PaymentService;
pub use report::ReportService;
pub use slot::SlotService;
