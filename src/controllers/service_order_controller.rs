use crate::dto::pagination_dto::{PagedResult, SearchParams};
use crate::dto::service_order_dto::{
    CreateServiceOrderRequest, MessageResponse, ServiceOrderResponse, UpdateServiceOrderRequest,
};
use crate::services::ServiceOrderService;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub const SEARCH_PATH: &str = "/api/service-orders/search";

pub struct ServiceOrderController {
    service: ServiceOrderService,
}

impl ServiceOrderController {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: ServiceOrderService::new(state.service_orders.clone(), state.vehicles.clone()),
        }
    }

    pub async fn search(&self, params: SearchParams) -> AppResult<PagedResult<ServiceOrderResponse>> {
        let params = params.normalize();
        let page = self
            .service
            .search(&params)
            .await
            .map_err(|e| e.context("Error searching service orders"))?;

        Ok(page.with_links(SEARCH_PATH, &params))
    }

    pub async fn list(&self) -> AppResult<Vec<ServiceOrderResponse>> {
        self.service
            .list_all()
            .await
            .map_err(|e| e.context("Error listing service orders"))
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<ServiceOrderResponse> {
        self.service
            .get_by_id(id)
            .await
            .map_err(|e| e.context("Error fetching service order"))
    }

    pub async fn create(&self, request: CreateServiceOrderRequest) -> AppResult<ServiceOrderResponse> {
        self.service
            .create(request)
            .await
            .map_err(|e| e.context("Error creating service order"))
    }

    pub async fn update(
        &self,
        id: i64,
        request: UpdateServiceOrderRequest,
    ) -> AppResult<ServiceOrderResponse> {
        self.service
            .update(id, request)
            .await
            .map_err(|e| e.context("Error updating service order"))
    }

    pub async fn close(&self, id: i64) -> AppResult<MessageResponse> {
        self.service
            .close(id)
            .await
            .map_err(|e| e.context("Error closing service order"))?;

        Ok(MessageResponse {
            message: "Service order closed successfully".to_string(),
        })
    }
}
