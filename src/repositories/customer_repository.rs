use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{Customer, NewCustomer};
use crate::repositories::map_write_error;
use crate::utils::errors::{not_found_error, AppResult};

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Customer>>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Customer>>;
    async fn find_by_tax_id(&self, tax_id: &str) -> AppResult<Option<Customer>>;
    async fn create(&self, customer: NewCustomer) -> AppResult<Customer>;
    async fn update(&self, customer: &Customer) -> AppResult<Customer>;
    async fn count(&self) -> AppResult<i64>;
}

pub struct PgCustomerRepository {
    pool: PgPool,
}

impl PgCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    async fn find_all(&self) -> AppResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>("SELECT * FROM customers ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(customers)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(customer)
    }

    async fn find_by_tax_id(&self, tax_id: &str) -> AppResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE tax_id = $1")
            .bind(tax_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(customer)
    }

    async fn create(&self, customer: NewCustomer) -> AppResult<Customer> {
        sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (name, tax_id, phone, email, address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(customer.name)
        .bind(customer.tax_id)
        .bind(customer.phone)
        .bind(customer.email)
        .bind(customer.address)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "customer", Some("tax id"), None))
    }

    async fn update(&self, customer: &Customer) -> AppResult<Customer> {
        sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers
            SET name = $2, tax_id = $3, phone = $4, email = $5, address = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(customer.id)
        .bind(&customer.name)
        .bind(&customer.tax_id)
        .bind(&customer.phone)
        .bind(&customer.email)
        .bind(&customer.address)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "customer", Some("tax id"), None))?
        .ok_or_else(|| not_found_error("Customer"))
    }

    async fn count(&self) -> AppResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
