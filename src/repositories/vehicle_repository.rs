use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{NewVehicle, Vehicle};
use crate::repositories::map_write_error;
use crate::utils::errors::{not_found_error, AppResult};

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Vehicle>>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Vehicle>>;
    async fn find_by_plate(&self, plate: &str) -> AppResult<Option<Vehicle>>;
    async fn create(&self, vehicle: NewVehicle) -> AppResult<Vehicle>;
    async fn update(&self, vehicle: &Vehicle) -> AppResult<Vehicle>;
}

pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleRepository for PgVehicleRepository {
    async fn find_all(&self) -> AppResult<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(vehicles)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    async fn find_by_plate(&self, plate: &str) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE plate = $1")
            .bind(plate)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    async fn create(&self, vehicle: NewVehicle) -> AppResult<Vehicle> {
        sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (plate, make, model, year, color, customer_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(vehicle.plate)
        .bind(vehicle.make)
        .bind(vehicle.model)
        .bind(vehicle.year)
        .bind(vehicle.color)
        .bind(vehicle.customer_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "vehicle", Some("plate"), Some("Customer")))
    }

    async fn update(&self, vehicle: &Vehicle) -> AppResult<Vehicle> {
        sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET plate = $2, make = $3, model = $4, year = $5, color = $6, customer_id = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(vehicle.id)
        .bind(&vehicle.plate)
        .bind(&vehicle.make)
        .bind(&vehicle.model)
        .bind(vehicle.year)
        .bind(&vehicle.color)
        .bind(vehicle.customer_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "vehicle", Some("plate"), Some("Customer")))?
        .ok_or_else(|| not_found_error("Vehicle"))
    }
}
