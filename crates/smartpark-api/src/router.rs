//! Route definitions for the SmartPark HTTP API.
//!
//! All routes are mounted under `/api`. Every resource route authenticates
//! through the [`AuthUser`](crate::extractors::AuthUser) extractor.

use axum::Router;
use axum::routing::{get, post, put};

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` router without outer middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(health_routes())
        .merge(auth_routes())
        .merge(car_routes())
        .merge(slot_routes())
        .merge(parking_routes())
        .merge(payment_routes())
        .merge(report_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Auth endpoints: register, login, profile, user listing
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/profile", get(handlers::auth::profile))
        .route("/auth/users", get(handlers::auth::list_users))
}

fn car_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/cars",
            get(handlers::car::list_cars).post(handlers::car::create_car),
        )
        .route(
            "/cars/{plate}",
            get(handlers::car::get_car)
                .put(handlers::car::update_car)
                .delete(handlers::car::delete_car),
        )
}

fn slot_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/parkingslots",
            get(handlers::slot::list_slots).post(handlers::slot::create_slot),
        )
        .route("/parkingslots/available", get(handlers::slot::list_available))
        .route("/parkingslots/occupied", get(handlers::slot::list_occupied))
        .route(
            "/parkingslots/{slot_number}",
            get(handlers::slot::get_slot).delete(handlers::slot::delete_slot),
        )
}

/// Occupancy endpoints: entry, exit, history
fn parking_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/parkingrecords",
            get(handlers::parking::list_records).post(handlers::parking::register_entry),
        )
        .route("/parkingrecords/active", get(handlers::parking::list_active))
        .route(
            "/parkingrecords/{id}",
            get(handlers::parking::get_record).delete(handlers::parking::delete_record),
        )
        .route(
            "/parkingrecords/{id}/exit",
            put(handlers::parking::register_exit),
        )
}

fn payment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/pspayments",
            get(handlers::payment::list_payments).post(handlers::payment::create_payment),
        )
        .route(
            "/pspayments/car/{plate}",
            get(handlers::payment::list_car_payments),
        )
        .route(
            "/pspayments/{payment_number}",
            get(handlers::payment::get_payment)
                .put(handlers::payment::update_payment)
                .delete(handlers::payment::delete_payment),
        )
}

fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/reports", get(handlers::report::parking_report))
        .route("/reports/parking", get(handlers::report::parking_report))
}
