//! Demo data
//!
//! Two customers with one vehicle and one service order each. Only runs
//! against an empty customer table.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use tracing::info;

use crate::models::{NewCustomer, NewServiceOrder, NewVehicle, ServiceOrderStatus};
use crate::repositories::{CustomerRepository, ServiceOrderRepository, VehicleRepository};
use crate::utils::errors::AppResult;

/// Seeds the store. Returns `false` when data was already present.
pub async fn seed_initial_data(
    customers: &dyn CustomerRepository,
    vehicles: &dyn VehicleRepository,
    orders: &dyn ServiceOrderRepository,
) -> AppResult<bool> {
    if customers.count().await? > 0 {
        info!("store already has data, skipping seed");
        return Ok(false);
    }

    let joao = customers
        .create(NewCustomer {
            name: "João Silva".to_string(),
            tax_id: "12345678901".to_string(),
            phone: "11999999999".to_string(),
            email: "joao@test.com".to_string(),
            address: "Rua Teste, 123".to_string(),
        })
        .await?;

    let maria = customers
        .create(NewCustomer {
            name: "Maria Santos".to_string(),
            tax_id: "98765432109".to_string(),
            phone: "11988888888".to_string(),
            email: "maria@test.com".to_string(),
            address: "Av. Exemplo, 456".to_string(),
        })
        .await?;

    let corolla = vehicles
        .create(NewVehicle {
            plate: "ABC1234".to_string(),
            make: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: 2022,
            color: "Branco".to_string(),
            customer_id: joao.id,
        })
        .await?;

    let civic = vehicles
        .create(NewVehicle {
            plate: "XYZ5678".to_string(),
            make: "Honda".to_string(),
            model: "Civic".to_string(),
            year: 2021,
            color: "Preto".to_string(),
            customer_id: maria.id,
        })
        .await?;

    let now = Utc::now();

    orders
        .create(NewServiceOrder {
            opened_at: now,
            closed_at: None,
            description: "Revisão completa".to_string(),
            status: ServiceOrderStatus::Waiting,
            total_value: Decimal::new(45000, 2),
            notes: Some("Cliente aguarda orçamento".to_string()),
            vehicle_id: corolla.id,
        })
        .await?;

    orders
        .create(NewServiceOrder {
            opened_at: now - Duration::days(1),
            closed_at: Some(now),
            description: "Troca de óleo e filtro".to_string(),
            status: ServiceOrderStatus::Completed,
            total_value: Decimal::new(12000, 2),
            notes: Some("Serviço realizado com sucesso".to_string()),
            vehicle_id: civic.id,
        })
        .await?;

    info!(customers = 2, vehicles = 2, service_orders = 2, "demo data seeded");
    Ok(true)
}
