//! Data access layer
//!
//! One trait per entity, implemented by `InMemoryStore` (default backend)
//! and by the sqlx-backed `Pg*Repository` types.

pub mod customer_repository;
pub mod memory;
pub mod service_order_repository;
pub mod vehicle_repository;

pub use customer_repository::{CustomerRepository, PgCustomerRepository};
pub use memory::InMemoryStore;
pub use service_order_repository::{PgServiceOrderRepository, ServiceOrderRepository};
pub use vehicle_repository::{PgVehicleRepository, VehicleRepository};

use crate::utils::errors::{duplicate_error, missing_reference_error, AppError};

// SQLSTATE codes
const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Turns constraint failures on insert/update into business-rule errors.
///
/// `unique` names the unique field of `resource`; `parent` names the
/// referenced entity.
pub(crate) fn map_write_error(
    err: sqlx::Error,
    resource: &str,
    unique: Option<&str>,
    parent: Option<&str>,
) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.code().as_deref() {
            Some(UNIQUE_VIOLATION) => {
                if let Some(field) = unique {
                    return duplicate_error(resource, field);
                }
            }
            Some(FOREIGN_KEY_VIOLATION) => {
                if let Some(parent) = parent {
                    return missing_reference_error(parent);
                }
            }
            _ => {}
        }
    }
    AppError::Database(err)
}
