use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, info, instrument};
use validator::Validate;

use crate::dto::pagination_dto::{PagedResult, SearchParams};
use crate::dto::patch::Patch;
use crate::dto::service_order_dto::{
    validate_total_value, CreateServiceOrderRequest, ServiceOrderResponse,
    UpdateServiceOrderRequest,
};
use crate::models::{NewServiceOrder, ServiceOrder, ServiceOrderStatus, Vehicle};
use crate::repositories::{ServiceOrderRepository, VehicleRepository};
use crate::services::{optional_text, required_text};
use crate::services::search::{self, Comparator, Searchable};
use crate::utils::errors::{missing_reference_error, not_found_error, validation_error, AppResult};

const MAX_DESCRIPTION: u64 = 500;
const MAX_NOTES: u64 = 1000;

impl Searchable for ServiceOrder {
    fn id(&self) -> i64 {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.description.as_str(), self.status.as_str()];
        if let Some(notes) = &self.notes {
            fields.push(notes.as_str());
        }
        fields
    }

    fn comparator(key: &str) -> Option<Comparator<Self>> {
        match key {
            "openedat" => Some(by_opened_at),
            "status" => Some(by_status),
            "totalvalue" => Some(by_total_value),
            _ => None,
        }
    }
}

fn by_opened_at(a: &ServiceOrder, b: &ServiceOrder) -> Ordering {
    a.opened_at.cmp(&b.opened_at)
}

fn by_status(a: &ServiceOrder, b: &ServiceOrder) -> Ordering {
    a.status.cmp(&b.status)
}

fn by_total_value(a: &ServiceOrder, b: &ServiceOrder) -> Ordering {
    a.total_value.cmp(&b.total_value)
}

/// Business rules for service orders
pub struct ServiceOrderService {
    orders: Arc<dyn ServiceOrderRepository>,
    vehicles: Arc<dyn VehicleRepository>,
}

impl ServiceOrderService {
    pub fn new(orders: Arc<dyn ServiceOrderRepository>, vehicles: Arc<dyn VehicleRepository>) -> Self {
        Self { orders, vehicles }
    }

    /// Opens a service order. `openedAt` is always assigned here; a `Closed`
    /// status on creation also stamps `closedAt`.
    #[instrument(skip(self, request), fields(vehicle_id = request.vehicle_id))]
    pub async fn create(&self, request: CreateServiceOrderRequest) -> AppResult<ServiceOrderResponse> {
        request.validate()?;

        let vehicle = self
            .vehicles
            .find_by_id(request.vehicle_id)
            .await?
            .ok_or_else(|| missing_reference_error("Vehicle"))?;

        let now = Utc::now();
        let status = request.status.unwrap_or_default();
        let closed_at = (status == ServiceOrderStatus::Closed).then_some(now);

        let order = self
            .orders
            .create(NewServiceOrder {
                opened_at: now,
                closed_at,
                description: request.description,
                status,
                total_value: request.total_value.unwrap_or(Decimal::ZERO),
                notes: request.notes,
                vehicle_id: request.vehicle_id,
            })
            .await?;

        info!(id = order.id, status = %order.status, "service order opened");
        Ok(ServiceOrderResponse::from_order(order, Some(&vehicle)))
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<ServiceOrderResponse> {
        let order = self.find(id).await?;
        self.with_vehicle(order).await
    }

    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        id: i64,
        request: UpdateServiceOrderRequest,
    ) -> AppResult<ServiceOrderResponse> {
        let mut order = self.find(id).await?;

        if let Some(description) = request.description.required("description")? {
            order.description = required_text("description", description, MAX_DESCRIPTION)?;
        }

        if let Some(total_value) = request.total_value.required("totalValue")? {
            if validate_total_value(&total_value).is_err() {
                return Err(validation_error(
                    "totalValue",
                    "must be non-negative with at most 10 integer digits and 2 decimals",
                ));
            }
            order.total_value = total_value;
        }

        let notes = match request.notes {
            Patch::Value(notes) => Patch::Value(optional_text("notes", notes, MAX_NOTES)?),
            other => other,
        };
        notes.apply_to(&mut order.notes);

        if let Some(vehicle_id) = request.vehicle_id.required("vehicleId")? {
            if vehicle_id != order.vehicle_id
                && self.vehicles.find_by_id(vehicle_id).await?.is_none()
            {
                return Err(missing_reference_error("Vehicle"));
            }
            order.vehicle_id = vehicle_id;
        }

        if let Some(status) = request.status.required("status")? {
            if status == ServiceOrderStatus::Closed {
                order.close(Utc::now());
            } else {
                order.status = status;
                order.closed_at = None;
            }
        }

        let updated = self.orders.update(&order).await?;
        info!(id = updated.id, status = %updated.status, "service order updated");
        self.with_vehicle(updated).await
    }

    /// Closes an order. Closing an already closed order keeps its close time.
    #[instrument(skip(self))]
    pub async fn close(&self, id: i64) -> AppResult<()> {
        let mut order = self.find(id).await?;
        if order.status == ServiceOrderStatus::Closed && order.closed_at.is_some() {
            debug!(id, "service order already closed");
            return Ok(());
        }

        order.close(Utc::now());
        self.orders.update(&order).await?;
        info!(id, "service order closed");
        Ok(())
    }

    pub async fn list_all(&self) -> AppResult<Vec<ServiceOrderResponse>> {
        let mut orders = self.orders.find_all().await?;
        orders.sort_by(|a, b| a.id.cmp(&b.id));

        let vehicles = self.vehicles_by_id().await?;
        Ok(orders
            .into_iter()
            .map(|o| {
                let vehicle = vehicles.get(&o.vehicle_id);
                ServiceOrderResponse::from_order(o, vehicle)
            })
            .collect())
    }

    pub async fn search(&self, params: &SearchParams) -> AppResult<PagedResult<ServiceOrderResponse>> {
        let orders = self.orders.find_all().await?;
        let page = search::search(orders, params);
        debug!(
            total = page.total_count,
            page = page.page_number,
            "service order search"
        );

        let vehicles = self.vehicles_by_id().await?;
        Ok(page.map(|o| {
            let vehicle = vehicles.get(&o.vehicle_id);
            ServiceOrderResponse::from_order(o, vehicle)
        }))
    }

    async fn find(&self, id: i64) -> AppResult<ServiceOrder> {
        self.orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Service order"))
    }

    async fn with_vehicle(&self, order: ServiceOrder) -> AppResult<ServiceOrderResponse> {
        let vehicle = self.vehicles.find_by_id(order.vehicle_id).await?;
        Ok(ServiceOrderResponse::from_order(order, vehicle.as_ref()))
    }

    async fn vehicles_by_id(&self) -> AppResult<HashMap<i64, Vehicle>> {
        let vehicles = self.vehicles.find_all().await?;
        Ok(vehicles.into_iter().map(|v| (v.id, v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewCustomer, NewVehicle};
    use crate::repositories::{CustomerRepository, InMemoryStore};
    use crate::utils::errors::AppError;

    async fn service() -> ServiceOrderService {
        let store = Arc::new(InMemoryStore::new());
        let owner = CustomerRepository::create(
            store.as_ref(),
            NewCustomer {
                name: "João Silva".to_string(),
                tax_id: "12345678901".to_string(),
                phone: String::new(),
                email: String::new(),
                address: String::new(),
            },
        )
        .await
        .unwrap();
        for (plate, model) in [("ABC1234", "Corolla"), ("XYZ5678", "Civic")] {
            VehicleRepository::create(
                store.as_ref(),
                NewVehicle {
                    plate: plate.to_string(),
                    make: "Make".to_string(),
                    model: model.to_string(),
                    year: 2022,
                    color: String::new(),
                    customer_id: owner.id,
                },
            )
            .await
            .unwrap();
        }
        ServiceOrderService::new(store.clone(), store)
    }

    fn request(description: &str, vehicle_id: i64) -> CreateServiceOrderRequest {
        CreateServiceOrderRequest {
            description: description.to_string(),
            status: None,
            total_value: None,
            notes: None,
            vehicle_id,
        }
    }

    #[tokio::test]
    async fn create_applies_defaults() {
        let svc = service().await;
        let created = svc.create(request("Revisão completa", 1)).await.unwrap();
        assert_eq!(created.status, ServiceOrderStatus::Waiting);
        assert_eq!(created.total_value, Decimal::ZERO);
        assert!(created.closed_at.is_none());
        assert_eq!(created.vehicle_plate, "ABC1234");
        assert_eq!(created.vehicle_model, "Corolla");
    }

    #[tokio::test]
    async fn create_closed_stamps_closed_at() {
        let svc = service().await;
        let mut req = request("Troca de óleo", 2);
        req.status = Some(ServiceOrderStatus::Closed);
        let created = svc.create(req).await.unwrap();
        assert_eq!(created.closed_at, Some(created.opened_at));
    }

    #[tokio::test]
    async fn create_rejects_unknown_vehicle_and_negative_total() {
        let svc = service().await;
        let err = svc.create(request("Alinhamento", 42)).await.unwrap_err();
        assert!(matches!(err, AppError::MissingReference(ref m) if m == "Vehicle not found."));

        let mut req = request("Alinhamento", 1);
        req.total_value = Some(Decimal::new(-100, 2));
        assert!(matches!(svc.create(req).await.unwrap_err(), AppError::Validation(_)));
    }

    #[tokio::test]
    async fn close_sets_status_and_is_idempotent() {
        let svc = service().await;
        let created = svc.create(request("Revisão", 1)).await.unwrap();

        svc.close(created.id).await.unwrap();
        let first = svc.get_by_id(created.id).await.unwrap();
        assert_eq!(first.status, ServiceOrderStatus::Closed);
        assert!(first.closed_at.is_some());

        svc.close(created.id).await.unwrap();
        let second = svc.get_by_id(created.id).await.unwrap();
        assert_eq!(second.closed_at, first.closed_at);
    }

    #[tokio::test]
    async fn close_unknown_order_is_not_found() {
        let svc = service().await;
        let err = svc.close(9).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "Service order not found."));
    }

    #[tokio::test]
    async fn update_patches_fields_and_clears_notes() {
        let svc = service().await;
        let mut req = request("Revisão", 1);
        req.notes = Some("Cliente aguarda orçamento".to_string());
        let created = svc.create(req).await.unwrap();

        let updated = svc
            .update(
                created.id,
                UpdateServiceOrderRequest {
                    status: Patch::Value(ServiceOrderStatus::InProgress),
                    total_value: Patch::Value(Decimal::new(45000, 2)),
                    notes: Patch::Null,
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.description, "Revisão");
        assert_eq!(updated.status, ServiceOrderStatus::InProgress);
        assert_eq!(updated.total_value, Decimal::new(45000, 2));
        assert!(updated.notes.is_none());
        assert_eq!(updated.opened_at, created.opened_at);
    }

    #[tokio::test]
    async fn update_to_closed_behaves_like_close() {
        let svc = service().await;
        let created = svc.create(request("Revisão", 1)).await.unwrap();
        let updated = svc
            .update(
                created.id,
                UpdateServiceOrderRequest {
                    status: Patch::Value(ServiceOrderStatus::Closed),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status, ServiceOrderStatus::Closed);
        assert!(updated.closed_at.is_some());
    }

    #[tokio::test]
    async fn update_rejects_negative_total_and_null_description() {
        let svc = service().await;
        let created = svc.create(request("Revisão", 1)).await.unwrap();

        let err = svc
            .update(
                created.id,
                UpdateServiceOrderRequest {
                    total_value: Patch::Value(Decimal::new(-1, 0)),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = svc
            .update(
                created.id,
                UpdateServiceOrderRequest {
                    description: Patch::Null,
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn search_matches_status_name_and_sorts_by_total() {
        let svc = service().await;
        let mut a = request("Revisão", 1);
        a.total_value = Some(Decimal::new(45000, 2));
        svc.create(a).await.unwrap();
        let mut b = request("Troca de óleo", 2);
        b.total_value = Some(Decimal::new(12000, 2));
        svc.create(b).await.unwrap();
        let mut c = request("Alinhamento", 1);
        c.status = Some(ServiceOrderStatus::Completed);
        svc.create(c).await.unwrap();

        let waiting = SearchParams {
            search_term: "waiting".to_string(),
            order_by: "TotalValue".to_string(),
            ..SearchParams::default()
        };
        let page = svc.search(&waiting).await.unwrap();
        let ids: Vec<i64> = page.items.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(page.items[0].vehicle_plate, "XYZ5678");
    }

    #[tokio::test]
    async fn update_enforces_column_widths_and_precision() {
        let svc = service().await;
        let created = svc.create(request("Revisão", 1)).await.unwrap();

        let rejected = [
            UpdateServiceOrderRequest {
                description: Patch::Value("d".repeat(501)),
                ..Default::default()
            },
            UpdateServiceOrderRequest {
                notes: Patch::Value("n".repeat(1001)),
                ..Default::default()
            },
            UpdateServiceOrderRequest {
                total_value: Patch::Value(Decimal::new(1_000_000_000_000, 2)),
                ..Default::default()
            },
            UpdateServiceOrderRequest {
                total_value: Patch::Value(Decimal::new(10_005, 3)),
                ..Default::default()
            },
        ];

        for update in rejected {
            let err = svc.update(created.id, update).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }

        assert_eq!(svc.get_by_id(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn create_rejects_total_beyond_column_precision() {
        let svc = service().await;
        let mut req = request("Motor", 1);
        req.total_value = Some(Decimal::new(1_000_000_000_000, 2));
        assert!(matches!(svc.create(req).await.unwrap_err(), AppError::Validation(_)));
    }
}
