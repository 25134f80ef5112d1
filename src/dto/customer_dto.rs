use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::patch::Patch;
use crate::models::Customer;

// Request to create a customer
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    #[validate(length(min = 1, max = 150))]
    pub name: String,

    #[validate(length(min = 1, max = 20))]
    pub tax_id: String,

    #[validate(length(max = 30))]
    pub phone: Option<String>,

    #[validate(email, length(max = 255))]
    pub email: Option<String>,

    #[validate(length(max = 255))]
    pub address: Option<String>,
}

// Request to update a customer; absent fields keep their value
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default)]
    pub tax_id: Patch<String>,
    #[serde(default)]
    pub phone: Patch<String>,
    #[serde(default)]
    pub email: Patch<String>,
    #[serde(default)]
    pub address: Patch<String>,
}

// Customer response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub id: i64,
    pub name: String,
    pub tax_id: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name,
            tax_id: customer.tax_id,
            phone: customer.phone,
            email: customer.email,
            address: customer.address,
        }
    }
}
