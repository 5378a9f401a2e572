//! Handler tests for Products domain
//!
//! Drive the products router over the seeded in-memory store:
//! - version negotiation (query parameter, header, default)
//! - listing filters, sort and paging over HTTP
//! - CRUD status codes and error envelopes
//! - batch delete methods and atomicity

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()
use utoipa::OpenApi;

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app() -> Router {
    let repository = InMemoryProductRepository::with_products(seed::catalog());
    let service = ProductService::new(repository);
    Router::new().nest("/products", handlers::router(service))
}

async fn send(app: &Router, method: &str, uri: &str) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

async fn send_json(app: &Router, method: &str, uri: &str, body: Value) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

fn ids(products: &[Product]) -> Vec<i32> {
    products.iter().map(|p| p.id).collect()
}

fn new_product() -> Value {
    json!({
        "name": "Canvas Tote",
        "sku": "AWATOT",
        "price": 24.5,
        "description": "Heavy canvas shopping bag",
        "isAvailable": true,
        "categoryId": 4
    })
}

#[tokio::test]
async fn test_list_defaults_to_first_page_of_v1() {
    let app = app();
    let response = send(&app, "GET", "/products").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["api-supported-versions"],
        "1.0, 2.0"
    );

    let products: Vec<Product> = json_body(response.into_body()).await;
    assert_eq!(ids(&products), vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn test_list_second_page() {
    let app = app();
    let response = send(&app, "GET", "/products?page=2&size=5").await;

    assert_eq!(response.status(), StatusCode::OK);
    let products: Vec<Product> = json_body(response.into_body()).await;
    assert_eq!(ids(&products), vec![6, 7, 8, 9, 10]);
}

#[tokio::test]
async fn test_v1_lists_unavailable_products() {
    let app = app();
    let response = send(&app, "GET", "/products?size=100").await;

    let products: Vec<Product> = json_body(response.into_body()).await;
    assert_eq!(products.len(), seed::catalog().len());
    assert!(products.iter().any(|p| !p.is_available));
}

#[tokio::test]
async fn test_v2_lists_only_available_products() {
    let app = app();
    let response = send(&app, "GET", "/products?size=100&api-version=2.0").await;

    assert_eq!(response.status(), StatusCode::OK);
    let products: Vec<Product> = json_body(response.into_body()).await;
    assert!(!products.is_empty());
    assert!(products.iter().all(|p| p.is_available));
}

#[tokio::test]
async fn test_v2_hides_unavailable_products_matched_by_filters() {
    let app = app();

    // the catalog's vest is unavailable; v1 finds it
    let response = send(&app, "GET", "/products?searchTerm=vest&size=100").await;
    let products: Vec<Product> = json_body(response.into_body()).await;
    assert!(products.iter().any(|p| !p.is_available));

    for uri in [
        "/products?searchTerm=vest&size=100&api-version=2.0",
        "/products?searchTerm=vest&sortBy=price&sortOrder=desc&size=100&api-version=2",
        "/products?minPrice=0&maxPrice=1000&size=100&api-version=2.0",
        "/products?api-version=2&api-version=2&searchTerm=vest&size=100",
    ] {
        let response = send(&app, "GET", uri).await;
        assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        let products: Vec<Product> = json_body(response.into_body()).await;
        assert!(products.iter().all(|p| p.is_available), "{}", uri);
    }
}

#[tokio::test]
async fn test_conflicting_repeated_versions_are_rejected() {
    let app = app();
    let response = send(&app, "GET", "/products?api-version=2&api-version=1").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "UNSUPPORTED_API_VERSION");
}

#[tokio::test]
async fn test_version_header_is_honoured() {
    let app = app();
    let request = Request::builder()
        .uri("/products?size=100")
        .header("X-API-Version", "2")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    let products: Vec<Product> = json_body(response.into_body()).await;
    assert!(products.iter().all(|p| p.is_available));
}

#[tokio::test]
async fn test_unsupported_version_is_rejected() {
    let app = app();
    let response = send(&app, "GET", "/products?api-version=3.0").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "UNSUPPORTED_API_VERSION");
}

#[tokio::test]
async fn test_list_filters_and_sorts() {
    let app = app();
    let response = send(
        &app,
        "GET",
        "/products?searchTerm=jacket&sortBy=price&sortOrder=desc&size=100",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let products: Vec<Product> = json_body(response.into_body()).await;
    assert!(products.len() > 1);
    assert!(products.iter().all(|p| p.name.to_lowercase().contains("jacket")));
    assert!(products.windows(2).all(|w| w[0].price >= w[1].price));
}

#[tokio::test]
async fn test_list_price_bounds_are_inclusive() {
    let app = app();
    let response = send(&app, "GET", "/products?minPrice=65&maxPrice=65&size=100").await;

    let products: Vec<Product> = json_body(response.into_body()).await;
    assert!(!products.is_empty());
    assert!(products.iter().all(|p| p.price == rust_decimal::Decimal::new(65, 0)));
}

#[tokio::test]
async fn test_list_rejects_malformed_price() {
    let app = app();
    let response = send(&app, "GET", "/products?minPrice=cheap").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_list_ignores_empty_price_bounds() {
    let app = app();
    let response = send(&app, "GET", "/products?minPrice=&maxPrice=&size=100").await;

    assert_eq!(response.status(), StatusCode::OK);
    let products: Vec<Product> = json_body(response.into_body()).await;
    assert_eq!(products.len(), seed::catalog().len());
}

#[tokio::test]
async fn test_get_product_handler() {
    let app = app();

    let response = send(&app, "GET", "/products/1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let product: Product = json_body(response.into_body()).await;
    assert_eq!(product.id, 1);

    let response = send(&app, "GET", "/products/999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, "GET", "/products/abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "INVALID_ID");
}

#[tokio::test]
async fn test_create_product_handler_returns_201_with_location() {
    let app = app();
    let next_id = seed::catalog().len() as i32 + 1;

    let response = send_json(&app, "POST", "/products", new_product()).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response.headers()[header::LOCATION],
        format!("/products/{}", next_id).as_str()
    );

    let product: Product = json_body(response.into_body()).await;
    assert_eq!(product.id, next_id);
    assert_eq!(product.name, "Canvas Tote");

    let response = send(&app, "GET", &format!("/products/{}", next_id)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_create_product_handler_validates_input() {
    let app = app();
    let mut body = new_product();
    body["name"] = json!("");
    body.as_object_mut().unwrap().remove("categoryId");

    let response = send_json(&app, "POST", "/products", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: Value = json_body(response.into_body()).await;
    assert_eq!(error["error"], "VALIDATION_ERROR");
    assert!(error["details"].get("name").is_some());
    assert!(error["details"].get("category_id").is_some());

    let response = send(&app, "GET", "/products?size=100").await;
    let products: Vec<Product> = json_body(response.into_body()).await;
    assert_eq!(products.len(), seed::catalog().len());
}

#[tokio::test]
async fn test_replace_product_handler() {
    let app = app();
    let mut body = new_product();
    body["id"] = json!(2);

    let response = send_json(&app, "PUT", "/products/2", body).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, "GET", "/products/2").await;
    let product: Product = json_body(response.into_body()).await;
    assert_eq!(product.name, "Canvas Tote");
    assert_eq!(product.category_id, 4);
}

#[tokio::test]
async fn test_replace_product_handler_rejects_id_mismatch() {
    let app = app();
    let mut body = new_product();
    body["id"] = json!(7);

    let response = send_json(&app, "PUT", "/products/5", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&app, "GET", "/products/5").await;
    let product: Product = json_body(response.into_body()).await;
    assert_ne!(product.name, "Canvas Tote");
}

#[tokio::test]
async fn test_replace_missing_product_is_not_found() {
    let app = app();
    let mut body = new_product();
    body["id"] = json!(999);

    let response = send_json(&app, "PUT", "/products/999", body).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_product_handler() {
    let app = app();

    let response = send(&app, "DELETE", "/products/3").await;
    assert_eq!(response.status(), StatusCode::OK);
    let product: Product = json_body(response.into_body()).await;
    assert_eq!(product.id, 3);

    let response = send(&app, "DELETE", "/products/3").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_batch_delete_v1_uses_delete() {
    let app = app();

    let response = send(&app, "DELETE", "/products/Delete?ids=1&ids=2").await;
    assert_eq!(response.status(), StatusCode::OK);
    let removed: Vec<Product> = json_body(response.into_body()).await;
    assert_eq!(ids(&removed), vec![1, 2]);

    assert_eq!(
        send(&app, "GET", "/products/1").await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_batch_delete_is_atomic() {
    let app = app();

    let response = send(&app, "DELETE", "/products/Delete?ids=1&ids=2&ids=999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    assert_eq!(send(&app, "GET", "/products/1").await.status(), StatusCode::OK);
    assert_eq!(send(&app, "GET", "/products/2").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_batch_delete_v2_uses_post() {
    let app = app();

    let response = send(&app, "POST", "/products/Delete?ids=4&api-version=2.0").await;
    assert_eq!(response.status(), StatusCode::OK);
    let removed: Vec<Product> = json_body(response.into_body()).await;
    assert_eq!(ids(&removed), vec![4]);

    let response = send(&app, "DELETE", "/products/Delete?ids=5&api-version=2.0").await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let response = send(&app, "POST", "/products/Delete?ids=5").await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    assert_eq!(send(&app, "GET", "/products/5").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_batch_delete_rejects_malformed_ids_with_json_envelope() {
    let app = app();
    let response = send(&app, "DELETE", "/products/Delete?ids=1&ids=abc").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "BAD_REQUEST");
    assert_eq!(body["code"], 1006);

    assert_eq!(send(&app, "GET", "/products/1").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_batch_delete_without_ids_removes_nothing() {
    let app = app();

    let response = send(&app, "DELETE", "/products/Delete").await;
    assert_eq!(response.status(), StatusCode::OK);
    let removed: Vec<Product> = json_body(response.into_body()).await;
    assert!(removed.is_empty());
}

#[tokio::test]
async fn test_unrouted_method_is_405() {
    let app = app();
    let response = send(&app, "PATCH", "/products/1").await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "METHOD_NOT_ALLOWED");
}

#[test]
fn test_openapi_documents_both_batch_delete_methods() {
    let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
    let batch = &doc["paths"]["/Delete"];

    assert!(batch.get("delete").is_some());
    assert!(batch.get("post").is_some());
}
