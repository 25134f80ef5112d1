use crate::dto::customer_dto::{CreateCustomerRequest, CustomerResponse, UpdateCustomerRequest};
use crate::dto::pagination_dto::{PagedResult, SearchParams};
use crate::services::CustomerService;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub const SEARCH_PATH: &str = "/api/customers/search";

pub struct CustomerController {
    service: CustomerService,
}

impl CustomerController {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: CustomerService::new(state.customers.clone()),
        }
    }

    pub async fn search(&self, params: SearchParams) -> AppResult<PagedResult<CustomerResponse>> {
        let params = params.normalize();
        let page = self
            .service
            .search(&params)
            .await
            .map_err(|e| e.context("Error searching customers"))?;

        Ok(page.with_links(SEARCH_PATH, &params))
    }

    pub async fn list(&self) -> AppResult<Vec<CustomerResponse>> {
        self.service
            .list_all()
            .await
            .map_err(|e| e.context("Error listing customers"))
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<CustomerResponse> {
        self.service
            .get_by_id(id)
            .await
            .map_err(|e| e.context("Error fetching customer"))
    }

    pub async fn create(&self, request: CreateCustomerRequest) -> AppResult<CustomerResponse> {
        self.service
            .create(request)
            .await
            .map_err(|e| e.context("Error creating customer"))
    }

    pub async fn update(&self, id: i64, request: UpdateCustomerRequest) -> AppResult<CustomerResponse> {
        self.service
            .update(id, request)
            .await
            .map_err(|e| e.context("Error updating customer"))
    }
}
