//! # smartpark-database
//!
//! Persistence for SmartPark. Services depend only on the store traits in
//! [`store`]; the PostgreSQL repositories and the in-memory store both
//! implement them, and [`StoreManager`] picks one from configuration.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod provider;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use provider::StoreManager;
