//! End-to-end tests of the demo service over real TCP connections.

use axum::{http::StatusCode, routing::get, Extension, Router};
use backend_kit::config::KitConfig;
use backend_kit::http::middleware::TransactionId;
use backend_kit::http::with_middleware;
use backend_kit::RequestContext;
use serde_json::Value;
use std::time::Duration;

mod common;

#[tokio::test]
async fn test_most_specific_variant_serves_request() {
    let addr = common::start_service(KitConfig::default()).await;
    let client = common::client();

    let body: Value = client
        .get(format!("http://{addr}/api/v1/items?search=rust&page=4&size=10"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["page"], 4);
    assert_eq!(body["size"], 10);
    assert_eq!(body["search"], "rust");
}

#[tokio::test]
async fn test_optional_parameters_can_be_omitted() {
    let addr = common::start_service(KitConfig::default()).await;
    let client = common::client();

    for (query, size, search) in [
        ("page=1", Value::from(20), Value::Null),
        ("page=1&size=7", Value::from(7), Value::Null),
        ("page=1&search=x", Value::from(20), Value::from("x")),
        // a malformed optional value falls through to a less specific variant
        ("page=1&size=big", Value::from(20), Value::Null),
    ] {
        let res = client
            .get(format!("http://{addr}/api/v1/items?{query}"))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK, "{query}");

        let body: Value = res.json().await.unwrap();
        assert_eq!(body["size"], size, "{query}");
        assert_eq!(body["search"], search, "{query}");
    }
}

#[tokio::test]
async fn test_mandatory_parameter_is_enforced() {
    let addr = common::start_service(KitConfig::default()).await;
    let client = common::client();

    for query in ["", "?size=5", "?page=one", "?page=%D9%A3"] {
        let res = client
            .get(format!("http://{addr}/api/v1/items{query}"))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "{query}");
    }

    let res = client
        .post(format!("http://{addr}/api/v1/items?page=1"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_ids_endpoint_returns_sorted_ids() {
    let addr = common::start_service(KitConfig::default()).await;
    let client = common::client();

    let body: Value = client
        .get(format!("http://{addr}/api/v1/ids?count=25"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let ids: Vec<&str> = body["ids"]
        .as_array()
        .unwrap()
        .iter()
        .map(|id| id.as_str().unwrap())
        .collect();
    assert_eq!(ids.len(), 25);

    let mut sorted = ids.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted, ids);
}

async fn echo_tx(Extension(tx): Extension<TransactionId>) -> String {
    let ctx = RequestContext::current();
    format!("{}|{}", tx, ctx.tx_id().unwrap_or_default())
}

async fn explode() -> &'static str {
    panic!("boom")
}

async fn slow() -> &'static str {
    tokio::time::sleep(Duration::from_secs(5)).await;
    "too late"
}

async fn app_with(config: KitConfig) -> std::net::SocketAddr {
    let router = Router::new()
        .route("/tx", get(echo_tx))
        .route("/explode", get(explode))
        .route("/slow", get(slow));
    common::serve(with_middleware(router, &config).unwrap()).await
}

async fn app() -> std::net::SocketAddr {
    app_with(KitConfig::default()).await
}

#[tokio::test]
async fn test_transaction_id_propagates_to_context() {
    let addr = app().await;
    let client = common::client();

    let body = client
        .get(format!("http://{addr}/tx"))
        .header("txID", "abc-123")
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "abc-123|abc-123");

    let body = client
        .get(format!("http://{addr}/tx"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    let (tx, ctx_tx) = body.split_once('|').unwrap();
    assert_eq!(tx.len(), 36);
    assert_eq!(tx, ctx_tx);
}

#[tokio::test]
async fn test_panic_is_recovered_and_server_keeps_serving() {
    let addr = app().await;
    let client = common::client();

    let res = client
        .get(format!("http://{addr}/explode"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.text().await.unwrap(), "Internal server error");

    let res = client
        .get(format!("http://{addr}/tx"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_slow_handler_times_out() {
    let mut config = KitConfig::default();
    config.server.request_timeout_secs = 1;
    let addr = app_with(config).await;

    let res = common::client()
        .get(format!("http://{addr}/slow"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::REQUEST_TIMEOUT);
}
