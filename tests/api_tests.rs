use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use workshop_orders::config::EnvironmentConfig;
use workshop_orders::database::seed_initial_data;
use workshop_orders::{create_app, AppState};

struct TestApp {
    router: Router,
}

struct TestResponse {
    status: StatusCode,
    location: Option<String>,
    body: Value,
}

impl TestApp {
    async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body)).await
    }

    async fn put(&self, uri: &str, body: Option<Value>) -> TestResponse {
        self.send(Method::PUT, uri, body).await
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        TestResponse {
            status,
            location,
            body,
        }
    }
}

async fn create_test_app() -> TestApp {
    let state = AppState::in_memory(EnvironmentConfig::default());
    seed_initial_data(
        state.customers.as_ref(),
        state.vehicles.as_ref(),
        state.service_orders.as_ref(),
    )
    .await
    .unwrap();

    TestApp {
        router: create_app(state),
    }
}

fn rels(body: &Value) -> Vec<String> {
    body["links"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["rel"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app().await;
    let response = app.get("/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["service"], "workshop_orders");
}

#[tokio::test]
async fn test_customer_search_by_surname() {
    let app = create_test_app().await;
    let response = app.get("/api/customers/search?searchTerm=Silva").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["totalCount"], 1);
    assert_eq!(response.body["items"][0]["name"], "João Silva");
    assert_eq!(response.body["items"][0]["taxId"], "12345678901");
    assert_eq!(response.body["totalPages"], 1);
    assert_eq!(rels(&response.body), vec!["self", "first", "last"]);

    let href = response.body["links"][0]["href"].as_str().unwrap();
    assert!(href.starts_with("/api/customers/search?pageNumber=1&pageSize=10"));
    assert!(href.ends_with("&searchTerm=Silva"));
}

#[tokio::test]
async fn test_search_without_matches_only_links_self_and_first() {
    let app = create_test_app().await;
    let response = app.get("/api/vehicles/search?searchTerm=Ferrari").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["totalCount"], 0);
    assert_eq!(response.body["totalPages"], 0);
    assert_eq!(response.body["hasNextPage"], false);
    assert_eq!(response.body["hasPreviousPage"], false);
    assert!(response.body["items"].as_array().unwrap().is_empty());
    assert_eq!(rels(&response.body), vec!["self", "first"]);
}

#[tokio::test]
async fn test_search_pagination_links() {
    let app = create_test_app().await;
    let response = app
        .get("/api/customers/search?pageNumber=2&pageSize=1&orderBy=name")
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["totalPages"], 2);
    assert_eq!(response.body["hasPreviousPage"], true);
    assert_eq!(response.body["hasNextPage"], false);
    assert_eq!(response.body["items"][0]["name"], "Maria Santos");
    assert_eq!(rels(&response.body), vec!["self", "first", "previous", "last"]);
}

#[tokio::test]
async fn test_search_unknown_sort_key_falls_back_to_id() {
    let app = create_test_app().await;
    let response = app
        .get("/api/customers/search?orderBy=favouriteColour&descending=false")
        .await;

    let ids: Vec<i64> = response.body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn test_search_clamps_page_parameters() {
    let app = create_test_app().await;
    let response = app
        .get("/api/service-orders/search?pageNumber=0&pageSize=0")
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["pageNumber"], 1);
    assert_eq!(response.body["pageSize"], 10);
    assert_eq!(response.body["totalCount"], 2);
}

#[tokio::test]
async fn test_create_customer_returns_location() {
    let app = create_test_app().await;
    let response = app
        .post(
            "/api/customers",
            json!({
                "name": "Carlos Pereira",
                "taxId": "11122233344",
                "email": "carlos@test.com"
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.location.as_deref(), Some("/api/customers/3"));
    assert_eq!(response.body["id"], 3);
    assert_eq!(response.body["phone"], "");

    let fetched = app.get("/api/customers/3").await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["name"], "Carlos Pereira");
}

#[tokio::test]
async fn test_duplicate_tax_id_is_rejected() {
    let app = create_test_app().await;
    let response = app
        .post(
            "/api/customers",
            json!({ "name": "Another João", "taxId": "12345678901" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["message"],
        "A customer with this tax id already exists."
    );
}

#[tokio::test]
async fn test_vehicle_with_unknown_customer_is_rejected() {
    let app = create_test_app().await;
    let response = app
        .post(
            "/api/vehicles",
            json!({
                "plate": "NEW0001",
                "make": "Fiat",
                "model": "Uno",
                "year": 2015,
                "customerId": 99
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Customer not found.");
}

#[tokio::test]
async fn test_vehicle_includes_owner_name() {
    let app = create_test_app().await;
    let response = app.get("/api/vehicles/2").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["plate"], "XYZ5678");
    assert_eq!(response.body["customerName"], "Maria Santos");
}

#[tokio::test]
async fn test_missing_records_return_404() {
    let app = create_test_app().await;

    for uri in ["/api/customers/999", "/api/vehicles/999", "/api/service-orders/999"] {
        let response = app.get(uri).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(response.body["code"], "NOT_FOUND");
    }
}

#[tokio::test]
async fn test_service_order_lifecycle() {
    let app = create_test_app().await;

    let created = app
        .post(
            "/api/service-orders",
            json!({
                "description": "Alinhamento e balanceamento",
                "totalValue": "180.00",
                "vehicleId": 1
            }),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.location.as_deref(), Some("/api/service-orders/3"));
    assert_eq!(created.body["status"], "Waiting");
    assert_eq!(created.body["totalValue"], "180.00");
    assert_eq!(created.body["vehiclePlate"], "ABC1234");
    assert!(created.body["closedAt"].is_null());

    let closed = app.put("/api/service-orders/3/close", None).await;
    assert_eq!(closed.status, StatusCode::OK);
    assert_eq!(closed.body["message"], "Service order closed successfully");

    let fetched = app.get("/api/service-orders/3").await;
    assert_eq!(fetched.body["status"], "Closed");
    assert!(fetched.body["closedAt"].is_string());
}

#[tokio::test]
async fn test_close_missing_service_order_returns_404() {
    let app = create_test_app().await;
    let response = app.put("/api/service-orders/42/close", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Service order not found.");
}

#[tokio::test]
async fn test_service_order_search_by_status_name() {
    let app = create_test_app().await;
    let response = app
        .get("/api/service-orders/search?searchTerm=completed")
        .await;

    assert_eq!(response.body["totalCount"], 1);
    assert_eq!(response.body["items"][0]["description"], "Troca de óleo e filtro");
    assert_eq!(response.body["items"][0]["vehicleModel"], "Civic");
}

#[tokio::test]
async fn test_update_customer_keeps_omitted_fields() {
    let app = create_test_app().await;
    let response = app
        .put(
            "/api/customers/1",
            Some(json!({ "phone": "11900000000" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["phone"], "11900000000");
    assert_eq!(response.body["name"], "João Silva");
    assert_eq!(response.body["email"], "joao@test.com");
}

#[tokio::test]
async fn test_update_rejects_null_required_field() {
    let app = create_test_app().await;
    let response = app
        .put("/api/vehicles/1", Some(json!({ "plate": null })))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_update_service_order_clears_notes() {
    let app = create_test_app().await;
    let response = app
        .put(
            "/api/service-orders/1",
            Some(json!({ "notes": null, "status": "InProgress" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["notes"].is_null());
    assert_eq!(response.body["status"], "InProgress");
    assert_eq!(response.body["description"], "Revisão completa");
}

#[tokio::test]
async fn test_malformed_body_is_a_bad_request() {
    let app = create_test_app().await;
    let response = app
        .post(
            "/api/service-orders",
            json!({ "description": "Pintura", "status": "Painted", "vehicleId": 1 }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], "INVALID_BODY");
}

#[tokio::test]
async fn test_search_with_largest_page_number_is_empty() {
    let app = create_test_app().await;
    let response = app
        .get("/api/customers/search?pageNumber=9223372036854775807&pageSize=10")
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["pageNumber"], i64::MAX);
    assert_eq!(response.body["totalCount"], 2);
    assert!(response.body["items"].as_array().unwrap().is_empty());
    assert_eq!(response.body["hasNextPage"], false);
}

#[tokio::test]
async fn test_unparseable_query_returns_json_error() {
    let app = create_test_app().await;
    let response = app.get("/api/customers/search?pageNumber=abc").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], "INVALID_PARAMETER");
    assert!(response.body["message"].is_string());
}

#[tokio::test]
async fn test_unparseable_id_returns_json_error() {
    let app = create_test_app().await;

    for uri in ["/api/customers/abc", "/api/vehicles/abc", "/api/service-orders/abc"] {
        let response = app.get(uri).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(response.body["code"], "INVALID_PARAMETER");
    }

    let response = app.put("/api/service-orders/abc/close", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], "INVALID_PARAMETER");
}

#[tokio::test]
async fn test_update_applies_create_length_limits() {
    let app = create_test_app().await;
    let response = app
        .put(
            "/api/customers/1",
            Some(json!({ "name": "n".repeat(5000), "taxId": "1".repeat(300) })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], "VALIDATION_ERROR");

    let stored = app.get("/api/customers/1").await;
    assert_eq!(stored.body["name"], "João Silva");
    assert_eq!(stored.body["taxId"], "12345678901");
}

#[tokio::test]
async fn test_update_rejects_total_beyond_two_decimals() {
    let app = create_test_app().await;
    let response = app
        .put(
            "/api/service-orders/1",
            Some(json!({ "totalValue": "10.005" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_numeric_update_values_are_never_treated_as_absent() {
    let app = create_test_app().await;

    // a zero year is validated, not skipped
    let vehicle = app.put("/api/vehicles/1", Some(json!({ "year": 0 }))).await;
    assert_eq!(vehicle.status, StatusCode::BAD_REQUEST);
    assert_eq!(vehicle.body["code"], "VALIDATION_ERROR");
    assert_eq!(app.get("/api/vehicles/1").await.body["year"], 2022);

    // a zero total is applied
    let order = app
        .put("/api/service-orders/1", Some(json!({ "totalValue": 0 })))
        .await;
    assert_eq!(order.status, StatusCode::OK);
    assert_eq!(order.body["totalValue"], "0");
}
