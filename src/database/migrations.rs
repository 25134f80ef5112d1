//! Schema setup
//!
//! Every statement is idempotent so it can run on each startup.

use sqlx::PgPool;
use tracing::info;

const MIGRATIONS: &[(&str, &str)] = &[
    (
        "service_order_status enum",
        r#"
        DO $$
        BEGIN
            CREATE TYPE service_order_status AS ENUM ('waiting', 'in_progress', 'completed', 'closed');
        EXCEPTION
            WHEN duplicate_object THEN NULL;
        END
        $$
        "#,
    ),
    (
        "customers table",
        r#"
        CREATE TABLE IF NOT EXISTS customers (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(150) NOT NULL,
            tax_id VARCHAR(20) NOT NULL UNIQUE,
            phone VARCHAR(30) NOT NULL DEFAULT '',
            email VARCHAR(255) NOT NULL DEFAULT '',
            address VARCHAR(255) NOT NULL DEFAULT ''
        )
        "#,
    ),
    (
        "vehicles table",
        r#"
        CREATE TABLE IF NOT EXISTS vehicles (
            id BIGSERIAL PRIMARY KEY,
            plate VARCHAR(10) NOT NULL UNIQUE,
            make VARCHAR(100) NOT NULL,
            model VARCHAR(100) NOT NULL,
            year INTEGER NOT NULL,
            color VARCHAR(50) NOT NULL DEFAULT '',
            customer_id BIGINT NOT NULL REFERENCES customers(id)
        )
        "#,
    ),
    (
        "service_orders table",
        r#"
        CREATE TABLE IF NOT EXISTS service_orders (
            id BIGSERIAL PRIMARY KEY,
            opened_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            closed_at TIMESTAMPTZ,
            description VARCHAR(500) NOT NULL,
            status service_order_status NOT NULL DEFAULT 'waiting',
            total_value NUMERIC(12, 2) NOT NULL DEFAULT 0 CHECK (total_value >= 0),
            notes VARCHAR(1000),
            vehicle_id BIGINT NOT NULL REFERENCES vehicles(id)
        )
        "#,
    ),
    (
        "vehicles customer index",
        "CREATE INDEX IF NOT EXISTS idx_vehicles_customer_id ON vehicles(customer_id)",
    ),
    (
        "service orders vehicle index",
        "CREATE INDEX IF NOT EXISTS idx_service_orders_vehicle_id ON service_orders(vehicle_id)",
    ),
];

/// Creates the enum, tables and indexes if they do not exist yet.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    for (name, statement) in MIGRATIONS {
        sqlx::query(statement).execute(pool).await?;
        info!(migration = name, "migration applied");
    }
    Ok(())
}
