use crate::dto::pagination_dto::{PagedResult, SearchParams};
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleResponse};
use crate::services::VehicleService;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub const SEARCH_PATH: &str = "/api/vehicles/search";

pub struct VehicleController {
    service: VehicleService,
}

impl VehicleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: VehicleService::new(state.vehicles.clone(), state.customers.clone()),
        }
    }

    pub async fn search(&self, params: SearchParams) -> AppResult<PagedResult<VehicleResponse>> {
        let params = params.normalize();
        let page = self
            .service
            .search(&params)
            .await
            .map_err(|e| e.context("Error searching vehicles"))?;

        Ok(page.with_links(SEARCH_PATH, &params))
    }

    pub async fn list(&self) -> AppResult<Vec<VehicleResponse>> {
        self.service
            .list_all()
            .await
            .map_err(|e| e.context("Error listing vehicles"))
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<VehicleResponse> {
        self.service
            .get_by_id(id)
            .await
            .map_err(|e| e.context("Error fetching vehicle"))
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> AppResult<VehicleResponse> {
        self.service
            .create(request)
            .await
            .map_err(|e| e.context("Error creating vehicle"))
    }

    pub async fn update(&self, id: i64, request: UpdateVehicleRequest) -> AppResult<VehicleResponse> {
        self.service
            .update(id, request)
            .await
            .map_err(|e| e.context("Error updating vehicle"))
    }
}
