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

use crate::controllers::VehicleController;
use crate::dto::pagination_dto::{PagedResult, SearchParams};
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/search", get(search_vehicles))
        .route("/", get(list_vehicles).post(create_vehicle))
        .route("/:id", get(get_vehicle).put(update_vehicle))
}

async fn search_vehicles(
    State(state): State<AppState>,
    query: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<PagedResult<VehicleResponse>>, AppError> {
    let Query(params) = query?;
    let controller = VehicleController::new(&state);
    let page = controller.search(params).await?;
    Ok(Json(page))
}

async fn list_vehicles(
    State(state): State<AppState>,
) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    let vehicles = controller.list().await?;
    Ok(Json(vehicles))
}

async fn get_vehicle(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<VehicleResponse>, AppError> {
    let Path(id) = path?;
    let controller = VehicleController::new(&state);
    let vehicle = controller.get_by_id(id).await?;
    Ok(Json(vehicle))
}

async fn create_vehicle(
    State(state): State<AppState>,
    payload: Result<Json<CreateVehicleRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload?;
    let controller = VehicleController::new(&state);
    let vehicle = controller.create(request).await?;
    let location = format!("/api/vehicles/{}", vehicle.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(vehicle)))
}

async fn update_vehicle(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateVehicleRequest>, JsonRejection>,
) -> Result<Json<VehicleResponse>, AppError> {
    let Path(id) = path?;
    let Json(request) = payload?;
    let controller = VehicleController::new(&state);
    let vehicle = controller.update(id, request).await?;
    Ok(Json(vehicle))
}
