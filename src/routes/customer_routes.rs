use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::controllers::CustomerController;
use crate::dto::customer_dto::{CreateCustomerRequest, CustomerResponse, UpdateCustomerRequest};
use crate::dto::pagination_dto::{PagedResult, SearchParams};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_customer_router() -> Router<AppState> {
    Router::new()
        .route("/search", get(search_customers))
        .route("/", get(list_customers).post(create_customer))
        .route("/:id", get(get_customer).put(update_customer))
}

async fn search_customers(
    State(state): State<AppState>,
    query: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<PagedResult<CustomerResponse>>, AppError> {
    let Query(params) = query?;
    let controller = CustomerController::new(&state);
    let page = controller.search(params).await?;
    Ok(Json(page))
}

async fn list_customers(
    State(state): State<AppState>,
) -> Result<Json<Vec<CustomerResponse>>, AppError> {
    let controller = CustomerController::new(&state);
    let customers = controller.list().await?;
    Ok(Json(customers))
}

async fn get_customer(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<CustomerResponse>, AppError> {
    let Path(id) = path?;
    let controller = CustomerController::new(&state);
    let customer = controller.get_by_id(id).await?;
    Ok(Json(customer))
}

async fn create_customer(
    State(state): State<AppState>,
    payload: Result<Json<CreateCustomerRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload?;
    let controller = CustomerController::new(&state);
    let customer = controller.create(request).await?;
    let location = format!("/api/customers/{}", customer.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(customer)))
}

async fn update_customer(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateCustomerRequest>, JsonRejection>,
) -> Result<Json<CustomerResponse>, AppError> {
    let Path(id) = path?;
    let Json(request) = payload?;
    let controller = CustomerController::new(&state);
    let customer = controller.update(id, request).await?;
    Ok(Json(customer))
}
