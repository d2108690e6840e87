//! Integration tests for the rate lookup service and its budget cascade.

use std::time::Duration;

use lookup_relay::config::RatesConfig;
use lookup_relay::error::LookupError;
use lookup_relay::rates;
use lookup_relay::storage::RateStore;

mod common;

fn rates_config(upstream: std::net::SocketAddr, db_path: &std::path::Path) -> RatesConfig {
    RatesConfig {
        upstream_url: format!("http://{}", upstream),
        db_path: db_path.to_string_lossy().into_owned(),
        ..RatesConfig::default()
    }
}

#[tokio::test]
async fn serves_the_bid_and_appends_history() {
    let upstream = common::start_fixed_upstream(200, r#"{"USDBRL": {"bid": "5.2735"}}"#).await;
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("rates.db");

    let config = rates_config(upstream, &db_path);
    let router = lookup_relay::http::rates::router(&config).unwrap();
    let (addr, shutdown) = common::serve_router(router).await;

    let res = common::test_client()
        .get(format!("http://{}/cotacao", addr))
        .send()
        .await
        .expect("rates service unreachable");

    assert_eq!(res.status(), 200);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["bid"], "5.2735");

    // The write is asynchronous to the response; give it a moment.
    tokio::time::sleep(Duration::from_millis(100)).await;
    let store = RateStore::open(&db_path).unwrap();
    assert_eq!(store.count().unwrap(), 1);

    shutdown.trigger();
}

#[tokio::test]
async fn slow_upstream_exceeds_the_nested_budget() {
    // 250ms is inside a typical caller's 300ms budget but past the server's
    // own 200ms sub-budget for the upstream call.
    let upstream = common::start_mock_upstream(|| async {
        tokio::time::sleep(Duration::from_millis(250)).await;
        (200, r#"{"USDBRL": {"bid": "5.2735"}}"#.to_string())
    })
    .await;
    let dir = tempfile::tempdir().unwrap();

    let config = rates_config(upstream, &dir.path().join("rates.db"));
    let router = lookup_relay::http::rates::router(&config).unwrap();
    let (addr, shutdown) = common::serve_router(router).await;

    let res = common::test_client()
        .get(format!("http://{}/cotacao", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 408);

    shutdown.trigger();
}

#[tokio::test]
async fn client_classifies_the_nested_timeout_before_its_own_budget() {
    let upstream = common::start_mock_upstream(|| async {
        tokio::time::sleep(Duration::from_millis(250)).await;
        (200, r#"{"USDBRL": {"bid": "5.2735"}}"#.to_string())
    })
    .await;
    let dir = tempfile::tempdir().unwrap();

    let config = rates_config(upstream, &dir.path().join("rates.db"));
    let router = lookup_relay::http::rates::router(&config).unwrap();
    let (addr, shutdown) = common::serve_router(router).await;

    let client = common::test_client();
    let url = format!("http://{}/cotacao", addr);
    let outcome = rates::fetch_quote(&client, &url, rates::CLIENT_BUDGET).await;

    // The server's 200ms sub-budget fires first; the client sees a timeout
    // classification, never a late success.
    match outcome {
        Err(LookupError::UpstreamTimeout { .. }) => {}
        other => panic!("expected a timeout classification, got {other:?}"),
    }

    shutdown.trigger();
}

#[tokio::test]
async fn failed_history_write_never_fails_the_quote() {
    let upstream = common::start_fixed_upstream(200, r#"{"USDBRL": {"bid": "5.2735"}}"#).await;
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("rates.db");

    let config = rates_config(upstream, &db_path);
    let router = lookup_relay::http::rates::router(&config).unwrap();
    let (addr, shutdown) = common::serve_router(router).await;

    let client = common::test_client();
    let url = format!("http://{}/cotacao", addr);

    let healthy = client.get(&url).send().await.unwrap();
    assert_eq!(healthy.status(), 200);
    let healthy_body = healthy.text().await.unwrap();

    // Corrupt the database file; every append from now on fails.
    std::fs::write(&db_path, b"definitely not a sqlite file").unwrap();

    let degraded = client.get(&url).send().await.unwrap();
    assert_eq!(degraded.status(), 200);
    let degraded_body = degraded.text().await.unwrap();

    assert_eq!(
        healthy_body, degraded_body,
        "the response must be identical whether the write succeeds or fails"
    );

    shutdown.trigger();
}
