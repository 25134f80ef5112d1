use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, instrument};
use validator::Validate;

use crate::dto::pagination_dto::{PagedResult, SearchParams};
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleResponse};
use crate::models::{NewVehicle, Vehicle};
use crate::repositories::{CustomerRepository, VehicleRepository};
use crate::services::{optional_text, required_text};
use crate::services::search::{self, Comparator, Searchable};
use crate::utils::errors::{
    duplicate_error, missing_reference_error, not_found_error, validation_error, AppResult,
};

const MAX_PLATE: u64 = 10;
const MAX_MAKE: u64 = 100;
const MAX_MODEL: u64 = 100;
const MAX_COLOR: u64 = 50;
const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 2100;

impl Searchable for Vehicle {
    fn id(&self) -> i64 {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.plate.as_str(), self.make.as_str(), self.model.as_str()]
    }

    fn comparator(key: &str) -> Option<Comparator<Self>> {
        match key {
            "plate" => Some(by_plate),
            "make" => Some(by_make),
            "customerid" => Some(by_customer_id),
            _ => None,
        }
    }
}

fn by_plate(a: &Vehicle, b: &Vehicle) -> Ordering {
    a.plate.cmp(&b.plate)
}

fn by_make(a: &Vehicle, b: &Vehicle) -> Ordering {
    a.make.cmp(&b.make)
}

fn by_customer_id(a: &Vehicle, b: &Vehicle) -> Ordering {
    a.customer_id.cmp(&b.customer_id)
}

/// Business rules for vehicles
pub struct VehicleService {
    vehicles: Arc<dyn VehicleRepository>,
    customers: Arc<dyn CustomerRepository>,
}

impl VehicleService {
    pub fn new(vehicles: Arc<dyn VehicleRepository>, customers: Arc<dyn CustomerRepository>) -> Self {
        Self { vehicles, customers }
    }

    #[instrument(skip(self, request), fields(plate = %request.plate))]
    pub async fn create(&self, request: CreateVehicleRequest) -> AppResult<VehicleResponse> {
        request.validate()?;

        if self.vehicles.find_by_plate(&request.plate).await?.is_some() {
            return Err(duplicate_error("vehicle", "plate"));
        }

        let owner = self
            .customers
            .find_by_id(request.customer_id)
            .await?
            .ok_or_else(|| missing_reference_error("Customer"))?;

        let vehicle = self
            .vehicles
            .create(NewVehicle {
                plate: request.plate,
                make: request.make,
                model: request.model,
                year: request.year,
                color: request.color.unwrap_or_default(),
                customer_id: request.customer_id,
            })
            .await?;

        info!(id = vehicle.id, customer_id = vehicle.customer_id, "vehicle created");
        Ok(VehicleResponse::from_vehicle(vehicle, owner.name))
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<VehicleResponse> {
        let vehicle = self
            .vehicles
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle"))?;

        self.with_owner(vehicle).await
    }

    #[instrument(skip(self, request))]
    pub async fn update(&self, id: i64, request: UpdateVehicleRequest) -> AppResult<VehicleResponse> {
        let mut vehicle = self
            .vehicles
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle"))?;

        if let Some(plate) = request.plate.required("plate")? {
            let plate = required_text("plate", plate, MAX_PLATE)?;
            if plate != vehicle.plate {
                if let Some(existing) = self.vehicles.find_by_plate(&plate).await? {
                    if existing.id != vehicle.id {
                        return Err(duplicate_error("vehicle", "plate"));
                    }
                }
            }
            vehicle.plate = plate;
        }

        if let Some(make) = request.make.required("make")? {
            vehicle.make = required_text("make", make, MAX_MAKE)?;
        }
        if let Some(model) = request.model.required("model")? {
            vehicle.model = required_text("model", model, MAX_MODEL)?;
        }

        if let Some(year) = request.year.required("year")? {
            if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
                return Err(validation_error("year", "must be between 1900 and 2100"));
            }
            vehicle.year = year;
        }

        if let Some(color) = request.color.required("color")? {
            vehicle.color = optional_text("color", color, MAX_COLOR)?;
        }

        if let Some(customer_id) = request.customer_id.required("customerId")? {
            if customer_id != vehicle.customer_id
                && self.customers.find_by_id(customer_id).await?.is_none()
            {
                return Err(missing_reference_error("Customer"));
            }
            vehicle.customer_id = customer_id;
        }

        let updated = self.vehicles.update(&vehicle).await?;
        info!(id = updated.id, "vehicle updated");
        self.with_owner(updated).await
    }

    pub async fn list_all(&self) -> AppResult<Vec<VehicleResponse>> {
        let mut vehicles = self.vehicles.find_all().await?;
        vehicles.sort_by(|a, b| a.id.cmp(&b.id));

        let names = self.owner_names().await?;
        Ok(vehicles
            .into_iter()
            .map(|v| attach_owner(v, &names))
            .collect())
    }

    pub async fn search(&self, params: &SearchParams) -> AppResult<PagedResult<VehicleResponse>> {
        let vehicles = self.vehicles.find_all().await?;
        let page = search::search(vehicles, params);
        debug!(
            total = page.total_count,
            page = page.page_number,
            "vehicle search"
        );

        let names = self.owner_names().await?;
        Ok(page.map(|v| attach_owner(v, &names)))
    }

    async fn with_owner(&self, vehicle: Vehicle) -> AppResult<VehicleResponse> {
        let name = self
            .customers
            .find_by_id(vehicle.customer_id)
            .await?
            .map(|c| c.name)
            .unwrap_or_default();
        Ok(VehicleResponse::from_vehicle(vehicle, name))
    }

    async fn owner_names(&self) -> AppResult<HashMap<i64, String>> {
        let customers = self.customers.find_all().await?;
        Ok(customers.into_iter().map(|c| (c.id, c.name)).collect())
    }
}

fn attach_owner(vehicle: Vehicle, names: &HashMap<i64, String>) -> VehicleResponse {
    let name = names.get(&vehicle.customer_id).cloned().unwrap_or_default();
    VehicleResponse::from_vehicle(vehicle, name)
}
