use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{NewServiceOrder, ServiceOrder};
use crate::repositories::map_write_error;
use crate::utils::errors::{not_found_error, AppResult};

#[async_trait]
pub trait ServiceOrderRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<ServiceOrder>>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<ServiceOrder>>;
    async fn create(&self, order: NewServiceOrder) -> AppResult<ServiceOrder>;
    async fn update(&self, order: &ServiceOrder) -> AppResult<ServiceOrder>;
}

pub struct PgServiceOrderRepository {
    pool: PgPool,
}

impl PgServiceOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServiceOrderRepository for PgServiceOrderRepository {
    async fn find_all(&self) -> AppResult<Vec<ServiceOrder>> {
        let orders = sqlx::query_as::<_, ServiceOrder>("SELECT * FROM service_orders ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(orders)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<ServiceOrder>> {
        let order = sqlx::query_as::<_, ServiceOrder>("SELECT * FROM service_orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(order)
    }

    async fn create(&self, order: NewServiceOrder) -> AppResult<ServiceOrder> {
        let order = sqlx::query_as::<_, ServiceOrder>(
            r#"
            INSERT INTO service_orders (opened_at, closed_at, description, status, total_value, notes, vehicle_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(order.opened_at)
        .bind(order.closed_at)
        .bind(order.description)
        .bind(order.status)
        .bind(order.total_value)
        .bind(order.notes)
        .bind(order.vehicle_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "service order", None, Some("Vehicle")))?;

        Ok(order)
    }

    async fn update(&self, order: &ServiceOrder) -> AppResult<ServiceOrder> {
        sqlx::query_as::<_, ServiceOrder>(
            r#"
            UPDATE service_orders
            SET closed_at = $2, description = $3, status = $4, total_value = $5, notes = $6, vehicle_id = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(order.id)
        .bind(order.closed_at)
        .bind(&order.description)
        .bind(order.status)
        .bind(order.total_value)
        .bind(&order.notes)
        .bind(order.vehicle_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "service order", None, Some("Vehicle")))?
        .ok_or_else(|| not_found_error("Service order"))
    }
}
