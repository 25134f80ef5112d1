//! Vehicle model
//!
//! Maps to the `vehicles` table. Every vehicle belongs to a customer and
//! its plate is unique.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: i64,
    pub plate: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub color: String,
    pub customer_id: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewVehicle {
    pub plate: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub color: String,
    pub customer_id: i64,
}

impl NewVehicle {
    pub fn into_vehicle(self, id: i64) -> Vehicle {
        Vehicle {
            id,
            plate: self.plate,
            make: self.make,
            model: self.model,
            year: self.year,
            color: self.color,
            customer_id: self.customer_id,
        }
    }
}
