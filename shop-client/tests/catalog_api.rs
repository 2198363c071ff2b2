// shop-client/tests/catalog_api.rs
// Catalog endpoints against an in-process axum backend

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde_json::json;
use shop_client::{
    CatalogApi, ClientConfig, ClientError, NetworkHttpClient, ProductQuery, Session,
};

type Seen = Arc<Mutex<Vec<HashMap<String, String>>>>;

async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/api", addr)
}

fn client(base_url: &str) -> NetworkHttpClient {
    NetworkHttpClient::new(&ClientConfig::new(base_url).with_timeout(5), Session::new()).unwrap()
}

async fn list_products(
    State(seen): State<Seen>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<serde_json::Value> {
    seen.lock().unwrap().push(params);
    Json(json!({
        "success": true,
        "data": {
            "products": [
                {"_id": "p1", "name": "Wrap Dress", "price": 49.5, "category": "Dresses"},
                {"_id": "p2", "name": "Slip Dress", "price": 60, "category": "Dresses"}
            ]
        }
    }))
}

#[tokio::test]
async fn test_list_products_sends_query_parameters() {
    let seen: Seen = Arc::default();
    let router = Router::new()
        .route("/api/products", get(list_products))
        .with_state(seen.clone());
    let base = spawn_backend(router).await;

    let query = ProductQuery::default()
        .with_category("Dresses")
        .with_sizes(["M", "S"])
        .with_colors(["black", "red"])
        .with_price_range(Some(Decimal::from(10)), Some(Decimal::from_str("99.9").unwrap()))
        .with_limit(50);
    let products = client(&base).list_products(&query).await.unwrap();

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].id, "p1");
    assert_eq!(products[1].price, Decimal::from(60));

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let params = &seen[0];
    assert_eq!(params["category"], "Dresses");
    assert_eq!(params["sizes"], "M,S");
    assert_eq!(params["colors"], "black,red");
    assert_eq!(params["minPrice"], "10");
    assert_eq!(params["maxPrice"], "99.9");
    assert_eq!(params["sortBy"], "createdAt");
    assert_eq!(params["sortOrder"], "desc");
    assert_eq!(params["limit"], "50");
}

#[tokio::test]
async fn test_unsuccessful_envelope_becomes_api_error() {
    let router = Router::new().route(
        "/api/products",
        get(|| async { Json(json!({"success": false, "message": "Invalid price range"})) }),
    );
    let base = spawn_backend(router).await;

    let err = client(&base)
        .list_products(&ProductQuery::default())
        .await
        .unwrap_err();

    match err {
        ClientError::Api { message } => assert_eq!(message, "Invalid price range"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_products_is_empty_page() {
    let router = Router::new().route(
        "/api/products",
        get(|| async { Json(json!({"success": true, "data": {}})) }),
    );
    let base = spawn_backend(router).await;

    let products = client(&base)
        .list_products(&ProductQuery::default())
        .await
        .unwrap();
    assert!(products.is_empty());
}

#[tokio::test]
async fn test_undecodable_body_is_invalid_response() {
    let router = Router::new().route(
        "/api/products",
        get(|| async { "<html>maintenance</html>" }),
    );
    let base = spawn_backend(router).await;

    let err = client(&base)
        .list_products(&ProductQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)));
    assert!(!err.is_transport());
}

#[tokio::test]
async fn test_error_status_maps_to_client_error() {
    let router = Router::new()
        .route(
            "/api/products",
            get(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"success": false, "message": "bad sort"})),
                )
            }),
        )
        .route(
            "/api/categories",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
    let base = spawn_backend(router).await;
    let client = client(&base);

    let err = client
        .list_products(&ProductQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Api { ref message } if message == "bad sort"));

    let err = client.list_categories().await.unwrap_err();
    assert!(matches!(err, ClientError::Internal(ref text) if text == "boom"));
}

async fn list_categories(headers: HeaderMap) -> impl IntoResponse {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    if auth != "Bearer secret" {
        return (StatusCode::UNAUTHORIZED, String::new()).into_response();
    }
    Json(json!({
        "success": true,
        "data": [
            {"_id": "c1", "name": "Dresses", "slug": "dresses"},
            {"_id": "c2", "name": "Jeans", "isActive": false}
        ]
    }))
    .into_response()
}

#[tokio::test]
async fn test_list_categories_uses_session_token() {
    let router = Router::new().route("/api/categories", get(list_categories));
    let base = spawn_backend(router).await;

    let anonymous = client(&base);
    let err = anonymous.list_categories().await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));

    let config = ClientConfig::new(&base);
    let signed_in = NetworkHttpClient::new(&config, Session::with_token("secret")).unwrap();
    let categories = signed_in.list_categories().await.unwrap();

    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].slug.as_deref(), Some("dresses"));
    assert!(!categories[1].is_active);
}

#[tokio::test]
async fn test_connection_failure_is_transport_error() {
    // Bind then drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{}/api", addr))
        .list_categories()
        .await
        .unwrap_err();
    assert!(err.is_transport());
}
