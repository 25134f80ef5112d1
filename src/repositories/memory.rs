//! In-memory store
//!
//! Default backend. Keeps the three tables behind one `RwLock` so unique
//! keys and parent references are checked and written atomically.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::{
    Customer, NewCustomer, NewServiceOrder, NewVehicle, ServiceOrder, Vehicle,
};
use crate::repositories::{CustomerRepository, ServiceOrderRepository, VehicleRepository};
use crate::utils::errors::{duplicate_error, missing_reference_error, not_found_error, AppResult};

#[derive(Debug, Default)]
struct Tables {
    customers: BTreeMap<i64, Customer>,
    vehicles: BTreeMap<i64, Vehicle>,
    service_orders: BTreeMap<i64, ServiceOrder>,
    last_customer_id: i64,
    last_vehicle_id: i64,
    last_service_order_id: i64,
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryStore {
    async fn find_all(&self) -> AppResult<Vec<Customer>> {
        let tables = self.tables.read().await;
        Ok(tables.customers.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Customer>> {
        let tables = self.tables.read().await;
        Ok(tables.customers.get(&id).cloned())
    }

    async fn find_by_tax_id(&self, tax_id: &str) -> AppResult<Option<Customer>> {
        let tables = self.tables.read().await;
        Ok(tables
            .customers
            .values()
            .find(|c| c.tax_id == tax_id)
            .cloned())
    }

    async fn create(&self, customer: NewCustomer) -> AppResult<Customer> {
        let mut tables = self.tables.write().await;
        if tables.customers.values().any(|c| c.tax_id == customer.tax_id) {
            return Err(duplicate_error("customer", "tax id"));
        }

        tables.last_customer_id += 1;
        let created = customer.into_customer(tables.last_customer_id);
        tables.customers.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, customer: &Customer) -> AppResult<Customer> {
        let mut tables = self.tables.write().await;
        if !tables.customers.contains_key(&customer.id) {
            return Err(not_found_error("Customer"));
        }
        if tables
            .customers
            .values()
            .any(|c| c.id != customer.id && c.tax_id == customer.tax_id)
        {
            return Err(duplicate_error("customer", "tax id"));
        }

        tables.customers.insert(customer.id, customer.clone());
        Ok(customer.clone())
    }

    async fn count(&self) -> AppResult<i64> {
        let tables = self.tables.read().await;
        Ok(tables.customers.len() as i64)
    }
}

#[async_trait]
impl VehicleRepository for InMemoryStore {
    async fn find_all(&self) -> AppResult<Vec<Vehicle>> {
        let tables = self.tables.read().await;
        Ok(tables.vehicles.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Vehicle>> {
        let tables = self.tables.read().await;
        Ok(tables.vehicles.get(&id).cloned())
    }

    async fn find_by_plate(&self, plate: &str) -> AppResult<Option<Vehicle>> {
        let tables = self.tables.read().await;
        Ok(tables.vehicles.values().find(|v| v.plate == plate).cloned())
    }

    async fn create(&self, vehicle: NewVehicle) -> AppResult<Vehicle> {
        let mut tables = self.tables.write().await;
        if tables.vehicles.values().any(|v| v.plate == vehicle.plate) {
            return Err(duplicate_error("vehicle", "plate"));
        }
        if !tables.customers.contains_key(&vehicle.customer_id) {
            return Err(missing_reference_error("Customer"));
        }

        tables.last_vehicle_id += 1;
        let created = vehicle.into_vehicle(tables.last_vehicle_id);
        tables.vehicles.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, vehicle: &Vehicle) -> AppResult<Vehicle> {
        let mut tables = self.tables.write().await;
        if !tables.vehicles.contains_key(&vehicle.id) {
            return Err(not_found_error("Vehicle"));
        }
        if tables
            .vehicles
            .values()
            .any(|v| v.id != vehicle.id && v.plate == vehicle.plate)
        {
            return Err(duplicate_error("vehicle", "plate"));
        }
        if !tables.customers.contains_key(&vehicle.customer_id) {
            return Err(missing_reference_error("Customer"));
        }

        tables.vehicles.insert(vehicle.id, vehicle.clone());
        Ok(vehicle.clone())
    }
}

#[async_trait]
impl ServiceOrderRepository for InMemoryStore {
    async fn find_all(&self) -> AppResult<Vec<ServiceOrder>> {
        let tables = self.tables.read().await;
        Ok(tables.service_orders.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<ServiceOrder>> {
        let tables = self.tables.read().await;
        Ok(tables.service_orders.get(&id).cloned())
    }

    async fn create(&self, order: NewServiceOrder) -> AppResult<ServiceOrder> {
        let mut tables = self.tables.write().await;
        if !tables.vehicles.contains_key(&order.vehicle_id) {
            return Err(missing_reference_error("Vehicle"));
        }

        tables.last_service_order_id += 1;
        let created = order.into_service_order(tables.last_service_order_id);
        tables.service_orders.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, order: &ServiceOrder) -> AppResult<ServiceOrder> {
        let mut tables = self.tables.write().await;
        if !tables.service_orders.contains_key(&order.id) {
            return Err(not_found_error("Service order"));
        }
        if !tables.vehicles.contains_key(&order.vehicle_id) {
            return Err(missing_reference_error("Vehicle"));
        }

        tables.service_orders.insert(order.id, order.clone());
        Ok(order.clone())
    }
}
