use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::patch::Patch;
use crate::models::Vehicle;

// Request to create a vehicle
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 10))]
    pub plate: String,

    #[validate(length(min = 1, max = 100))]
    pub make: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,

    #[validate(length(max = 50))]
    pub color: Option<String>,

    pub customer_id: i64,
}

// Request to update a vehicle
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleRequest {
    #[serde(default)]
    pub plate: Patch<String>,
    #[serde(default)]
    pub make: Patch<String>,
    #[serde(default)]
    pub model: Patch<String>,
    #[serde(default)]
    pub year: Patch<i32>,
    #[serde(default)]
    pub color: Patch<String>,
    #[serde(default)]
    pub customer_id: Patch<i64>,
}

// Vehicle response, with the owner's name resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleResponse {
    pub id: i64,
    pub plate: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub color: String,
    pub customer_id: i64,
    pub customer_name: String,
}

impl VehicleResponse {
    pub fn from_vehicle(vehicle: Vehicle, customer_name: impl Into<String>) -> Self {
        Self {
            id: vehicle.id,
            plate: vehicle.plate,
            make: vehicle.make,
            model: vehicle.model,
            year: vehicle.year,
            color: vehicle.color,
            customer_id: vehicle.customer_id,
            customer_name: customer_name.into(),
        }
    }
}
