//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use smartpark_auth::jwt::{JwtDecoder, JwtEncoder};
use smartpark_auth::password::{PasswordHasher, PasswordPolicy};
use smartpark_core::config::AppConfig;
use smartpark_database::StoreManager;
use smartpark_service::{
    AuthService, CarService, OccupancyService, PaymentService, ReportService, SlotService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Store handles (PostgreSQL or in-memory)
    pub stores: StoreManager,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    pub auth_service: Arc<AuthService>,
    pub car_service: Arc<CarService>,
    pub slot_service: Arc<SlotService>,
    pub occupancy_service: Arc<OccupancyService>,
    pub payment_service: Arc<PaymentService>,
    pub report_service: Arc<ReportService>,
}

impl AppState {
    /// Wire every service over the given stores.
    pub fn new(config: AppConfig, stores: StoreManager) -> Self {
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
        let password_hasher = Arc::new(PasswordHasher::new());
        let password_policy = Arc::new(PasswordPolicy::new(&config.auth));

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&stores.users),
            password_hasher,
            password_policy,
            jwt_encoder,
        ));
        let car_service = Arc::new(CarService::new(Arc::clone(&stores.cars)));
        let slot_service = Arc::new(SlotService::new(Arc::clone(&stores.slots)));
        let occupancy_service = Arc::new(OccupancyService::new(Arc::clone(&stores.records)));
        let payment_service = Arc::new(PaymentService::new(
            Arc::clone(&stores.payments),
            Arc::clone(&stores.cars),
        ));
        let report_service = Arc::new(ReportService::new(
            Arc::clone(&stores.reports),
            &config.parking,
        ));

        Self {
            config: Arc::new(config),
            stores,
            jwt_decoder,
            auth_service,
            car_service,
            slot_service,
            occupancy_service,
            payment_service,
            report_service,
        }
    }
}
