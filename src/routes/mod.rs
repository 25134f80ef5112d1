//! HTTP routes
//!
//! Builds the full router: the three resource routers, a health check and
//! the tracing, compression and CORS layers.

pub mod customer_routes;
pub mod service_order_routes;
pub mod vehicle_routes;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::cors::cors_layer;
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health))
        .nest("/api/customers", customer_routes::create_customer_router())
        .nest("/api/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/api/service-orders", service_order_routes::create_service_order_router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
