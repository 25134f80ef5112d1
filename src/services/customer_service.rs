use std::cmp::Ordering;
use std::sync::Arc;

use tracing::{debug, info, instrument};
use validator::Validate;

use crate::dto::customer_dto::{CreateCustomerRequest, CustomerResponse, UpdateCustomerRequest};
use crate::dto::pagination_dto::{PagedResult, SearchParams};
use crate::models::{Customer, NewCustomer};
use crate::repositories::CustomerRepository;
use crate::services::search::{self, Comparator, Searchable};
use crate::services::{optional_text, required_text};
use crate::utils::errors::{duplicate_error, not_found_error, validation_error, AppResult};

// Column widths of the customers table
const MAX_NAME: u64 = 150;
const MAX_TAX_ID: u64 = 20;
const MAX_PHONE: u64 = 30;
const MAX_EMAIL: u64 = 255;
const MAX_ADDRESS: u64 = 255;

impl Searchable for Customer {
    fn id(&self) -> i64 {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.tax_id.as_str(), self.email.as_str()]
    }

    fn comparator(key: &str) -> Option<Comparator<Self>> {
        match key {
            "name" => Some(by_name),
            "taxid" => Some(by_tax_id),
            _ => None,
        }
    }
}

fn by_name(a: &Customer, b: &Customer) -> Ordering {
    a.name.cmp(&b.name)
}

fn by_tax_id(a: &Customer, b: &Customer) -> Ordering {
    a.tax_id.cmp(&b.tax_id)
}

/// Business rules for customers
pub struct CustomerService {
    customers: Arc<dyn CustomerRepository>,
}

impl CustomerService {
    pub fn new(customers: Arc<dyn CustomerRepository>) -> Self {
        Self { customers }
    }

    #[instrument(skip(self, request), fields(tax_id = %request.tax_id))]
    pub async fn create(&self, request: CreateCustomerRequest) -> AppResult<CustomerResponse> {
        request.validate()?;

        if self.customers.find_by_tax_id(&request.tax_id).await?.is_some() {
            return Err(duplicate_error("customer", "tax id"));
        }

        let customer = self
            .customers
            .create(NewCustomer {
                name: request.name,
                tax_id: request.tax_id,
                phone: request.phone.unwrap_or_default(),
                email: request.email.unwrap_or_default(),
                address: request.address.unwrap_or_default(),
            })
            .await?;

        info!(id = customer.id, "customer created");
        Ok(customer.into())
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<CustomerResponse> {
        let customer = self
            .customers
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Customer"))?;

        Ok(customer.into())
    }

    #[instrument(skip(self, request))]
    pub async fn update(&self, id: i64, request: UpdateCustomerRequest) -> AppResult<CustomerResponse> {
        let mut customer = self
            .customers
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Customer"))?;

        if let Some(name) = request.name.required("name")? {
            customer.name = required_text("name", name, MAX_NAME)?;
        }

        if let Some(tax_id) = request.tax_id.required("taxId")? {
            let tax_id = required_text("taxId", tax_id, MAX_TAX_ID)?;
            if tax_id != customer.tax_id {
                if let Some(existing) = self.customers.find_by_tax_id(&tax_id).await? {
                    if existing.id != customer.id {
                        return Err(duplicate_error("customer", "tax id"));
                    }
                }
            }
            customer.tax_id = tax_id;
        }

        if let Some(phone) = request.phone.required("phone")? {
            customer.phone = optional_text("phone", phone, MAX_PHONE)?;
        }
        if let Some(email) = request.email.required("email")? {
            if !email.is_empty() && !validator::validate_email(&email) {
                return Err(validation_error("email", "must be a valid email address"));
            }
            customer.email = optional_text("email", email, MAX_EMAIL)?;
        }
        if let Some(address) = request.address.required("address")? {
            customer.address = optional_text("address", address, MAX_ADDRESS)?;
        }

        let updated = self.customers.update(&customer).await?;
        info!(id = updated.id, "customer updated");
        Ok(updated.into())
    }

    pub async fn list_all(&self) -> AppResult<Vec<CustomerResponse>> {
        let mut customers = self.customers.find_all().await?;
        customers.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(customers.into_iter().map(CustomerResponse::from).collect())
    }

    pub async fn search(&self, params: &SearchParams) -> AppResult<PagedResult<CustomerResponse>> {
        let customers = self.customers.find_all().await?;
        let page = search::search(customers, params);
        debug!(
            total = page.total_count,
            page = page.page_number,
            "customer search"
        );
        Ok(page.map(CustomerResponse::from))
    }
}
