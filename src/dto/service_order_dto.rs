use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::dto::patch::Patch;
use crate::models::{ServiceOrder, ServiceOrderStatus, Vehicle};

// Request to open a service order
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceOrderRequest {
    #[validate(length(min = 1, max = 500))]
    pub description: String,

    pub status: Option<ServiceOrderStatus>,

    #[validate(custom = "validate_total_value")]
    pub total_value: Option<Decimal>,

    #[validate(length(max = 1000))]
    pub notes: Option<String>,

    pub vehicle_id: i64,
}

// Request to update a service order
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceOrderRequest {
    #[serde(default)]
    pub description: Patch<String>,
    #[serde(default)]
    pub status: Patch<ServiceOrderStatus>,
    #[serde(default)]
    pub total_value: Patch<Decimal>,
    #[serde(default)]
    pub notes: Patch<String>,
    #[serde(default)]
    pub vehicle_id: Patch<i64>,
}

// Service order response, with plate and model of the vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOrderResponse {
    pub id: i64,
    pub opened_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub description: String,
    pub status: ServiceOrderStatus,
    pub total_value: Decimal,
    pub notes: Option<String>,
    pub vehicle_id: i64,
    pub vehicle_plate: String,
    pub vehicle_model: String,
}

impl ServiceOrderResponse {
    pub fn from_order(order: ServiceOrder, vehicle: Option<&Vehicle>) -> Self {
        Self {
            id: order.id,
            opened_at: order.opened_at,
            closed_at: order.closed_at,
            description: order.description,
            status: order.status,
            total_value: order.total_value,
            notes: order.notes,
            vehicle_id: order.vehicle_id,
            vehicle_plate: vehicle.map(|v| v.plate.clone()).unwrap_or_default(),
            vehicle_model: vehicle.map(|v| v.model.clone()).unwrap_or_default(),
        }
    }
}

// Close confirmation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Largest total value a `NUMERIC(12, 2)` column holds
const MAX_TOTAL_VALUE: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

/// Total values are non-negative, with at most 10 integer digits and 2 decimals.
pub fn validate_total_value(value: &Decimal) -> Result<(), ValidationError> {
    let code = if value.is_sign_negative() && !value.is_zero() {
        "non_negative"
    } else if value.normalize().scale() > 2 {
        "scale"
    } else if *value > MAX_TOTAL_VALUE {
        "precision"
    } else {
        return Ok(());
    };

    let mut error = ValidationError::new(code);
    error.add_param("value".into(), &value.to_string());
    Err(error)
}
