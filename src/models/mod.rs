//! Domain models
//!
//! Entities stored by the repositories. Field names match the PostgreSQL
//! schema created in `database::migrations`.

pub mod customer;
pub mod service_order;
pub mod vehicle;

pub use customer::{Customer, NewCustomer};
pub use service_order::{NewServiceOrder, ServiceOrder, ServiceOrderStatus};
pub use vehicle::{NewVehicle, Vehicle};
