//! Customer model
//!
//! Maps to the `customers` table. The tax id is unique across customers.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub tax_id: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

/// Customer fields before the store assigns an id
#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub name: String,
    pub tax_id: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl NewCustomer {
    pub fn into_customer(self, id: i64) -> Customer {
        Customer {
            id,
            name: self.name,
            tax_id: self.tax_id,
            phone: self.phone,
            email: self.email,
            address: self.address,
        }
    }
}
