use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};

use crate::controllers::ServiceOrderController;
use crate::dto::pagination_dto::{PagedResult, SearchParams};
use crate::dto::service_order_dto::{
    CreateServiceOrderRequest, MessageResponse, ServiceOrderResponse, UpdateServiceOrderRequest,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_service_order_router() -> Router<AppState> {
    Router::new()
        .route("/search", get(search_service_orders))
        .route("/", get(list_service_orders).post(create_service_order))
        .route("/:id", get(get_service_order).put(update_service_order))
        .route("/:id/close", put(close_service_order))
}

async fn search_service_orders(
    State(state): State<AppState>,
    query: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<PagedResult<ServiceOrderResponse>>, AppError> {
    let Query(params) = query?;
    let controller = ServiceOrderController::new(&state);
    let page = controller.search(params).await?;
    Ok(Json(page))
}

async fn list_service_orders(
    State(state): State<AppState>,
) -> Result<Json<Vec<ServiceOrderResponse>>, AppError> {
    let controller = ServiceOrderController::new(&state);
    let orders = controller.list().await?;
    Ok(Json(orders))
}

async fn get_service_order(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<ServiceOrderResponse>, AppError> {
    let Path(id) = path?;
    let controller = ServiceOrderController::new(&state);
    let order = controller.get_by_id(id).await?;
    Ok(Json(order))
}

async fn create_service_order(
    State(state): State<AppState>,
    payload: Result<Json<CreateServiceOrderRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload?;
    let controller = ServiceOrderController::new(&state);
    let order = controller.create(request).await?;
    let location = format!("/api/service-orders/{}", order.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(order)))
}

async fn update_service_order(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateServiceOrderRequest>, JsonRejection>,
) -> Result<Json<ServiceOrderResponse>, AppError> {
    let Path(id) = path?;
    let Json(request) = payload?;
    let controller = ServiceOrderController::new(&state);
    let order = controller.update(id, request).await?;
    Ok(Json(order))
}

async fn close_service_order(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Path(id) = path?;
    let controller = ServiceOrderController::new(&state);
    let message = controller.close(id).await?;
    Ok(Json(message))
}
