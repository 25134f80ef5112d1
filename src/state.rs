//! Shared application state
//!
//! Holds the configuration and the three repositories behind trait objects,
//! so handlers are the same for both storage backends.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::{
    CustomerRepository, InMemoryStore, PgCustomerRepository, PgServiceOrderRepository,
    PgVehicleRepository, ServiceOrderRepository, VehicleRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub customers: Arc<dyn CustomerRepository>,
    pub vehicles: Arc<dyn VehicleRepository>,
    pub service_orders: Arc<dyn ServiceOrderRepository>,
}

impl AppState {
    /// State backed by a single in-memory store
    pub fn in_memory(config: EnvironmentConfig) -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            config,
            customers: store.clone(),
            vehicles: store.clone(),
            service_orders: store,
        }
    }

    /// State backed by postgres
    pub fn postgres(config: EnvironmentConfig, pool: PgPool) -> Self {
        Self {
            config,
            customers: Arc::new(PgCustomerRepository::new(pool.clone())),
            vehicles: Arc::new(PgVehicleRepository::new(pool.clone())),
            service_orders: Arc::new(PgServiceOrderRepository::new(pool)),
        }
    }
}
