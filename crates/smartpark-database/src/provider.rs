//! Store manager that wires the configured backend into every store trait.

use std::sync::Arc;

use tracing::info;

use smartpark_core::config::{DatabaseConfig, StoreProvider};
use smartpark_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::MemoryStore;
use crate::migration::run_migrations;
use crate::repositories::{
    CarRepository, ParkingRecordRepository, PaymentRepository, ReportRepository, SlotRepository,
    UserRepository,
};
use crate::store::{CarStore, ParkingStore, PaymentStore, ReportStore, SlotStore, UserStore};

/// Handles to every store, backed by one provider.
///
/// The provider is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct StoreManager {
    /// Car store.
    pub cars: Arc<dyn CarStore>,
    /// Parking slot store.
    pub slots: Arc<dyn SlotStore>,
    /// Parking record store.
    pub records: Arc<dyn ParkingStore>,
    /// Payment store.
    pub payments: Arc<dyn PaymentStore>,
    /// User store.
    pub users: Arc<dyn UserStore>,
    /// Report aggregates.
    pub reports: Arc<dyn ReportStore>,
    /// The PostgreSQL pool, when that provider is active.
    database: Option<DatabasePool>,
}

impl StoreManager {
    /// Connect to the configured provider, running migrations if enabled.
    pub async fn new(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider {
            StoreProvider::Postgres => {
                info!("Initializing PostgreSQL store provider");
                let database = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    run_migrations(database.pool()).await?;
                }
                Ok(Self::from_database(database))
            }
            StoreProvider::Memory => {
                info!("Initializing in-memory store provider");
                Ok(Self::from_memory(MemoryStore::new()))
            }
        }
    }

    /// Build PostgreSQL repositories over an open pool.
    pub fn from_database(database: DatabasePool) -> Self {
        let pool = database.pool().clone();
        Self {
            cars: Arc::new(CarRepository::new(pool.clone())),
            slots: Arc::new(SlotRepository::new(pool.clone())),
            records: Arc::new(ParkingRecordRepository::new(pool.clone())),
            payments: Arc::new(PaymentRepository::new(pool.clone())),
            users: Arc::new(UserRepository::new(pool.clone())),
            reports: Arc::new(ReportRepository::new(pool)),
            database: Some(database),
        }
    }

    /// Share one in-memory store across every handle.
    pub fn from_memory(store: MemoryStore) -> Self {
        Self {
            cars: Arc::new(store.clone()),
            slots: Arc::new(store.clone()),
            records: Arc::new(store.clone()),
            payments: Arc::new(store.clone()),
            users: Arc::new(store.clone()),
            reports: Arc::new(store),
            database: None,
        }
    }

    /// The PostgreSQL pool, if this manager is backed by one.
    pub fn database(&self) -> Option<&DatabasePool> {
        self.database.as_ref()
    }

    /// Check that the backend answers.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.database {
            Some(database) => database.health_check().await,
            None => Ok(true),
        }
    }

    /// Release backend resources.
    pub async fn close(&self) {
        if let Some(database) = &self.database {
            database.close().await;
        }
    }
}
