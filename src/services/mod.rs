//! Services module
//!
//! Business rules for customers, vehicles and service orders. Services sit
//! between the controllers and the repository traits, so the same rules
//! apply to both storage backends.

pub mod customer_service;
pub mod search;
pub mod service_order_service;
pub mod vehicle_service;

pub use customer_service::CustomerService;
pub use service_order_service::ServiceOrderService;
pub use vehicle_service::VehicleService;

use crate::utils::errors::{validation_error, AppResult};

/// Checks a required text field on update: not blank, at most `max` characters.
pub(crate) fn required_text(field: &'static str, value: String, max: u64) -> AppResult<String> {
    if value.trim().is_empty() {
        return Err(validation_error(field, "must not be empty"));
    }
    optional_text(field, value, max)
}

/// Checks an optional text field on update: at most `max` characters.
pub(crate) fn optional_text(field: &'static str, value: String, max: u64) -> AppResult<String> {
    if !validator::validate_length(value.as_str(), None, Some(max), None) {
        return Err(validation_error(
            field,
            format!("must be at most {} characters", max),
        ));
    }
    Ok(value)
}
