//! Integration tests for the validating gateway.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use lookup_relay::config::GatewayConfig;

mod common;

fn gateway_config(downstream: std::net::SocketAddr) -> GatewayConfig {
    GatewayConfig {
        downstream_url: format!("http://{}/", downstream),
        ..GatewayConfig::default()
    }
}

#[tokio::test]
async fn relays_downstream_status_and_body_unchanged() {
    let downstream = common::start_fixed_upstream(
        200,
        r#"{"city":"São Paulo","temp_C":25.0,"temp_F":77.0,"temp_K":298.0}"#,
    )
    .await;

    let config = gateway_config(downstream);
    let (addr, shutdown) = common::serve_router(lookup_relay::http::gateway::router(&config)).await;

    let res = common::test_client()
        .post(format!("http://{}", addr))
        .json(&serde_json::json!({"cep": "01310100"}))
        .send()
        .await
        .expect("gateway unreachable");

    assert_eq!(res.status(), 200);
    assert_eq!(
        res.text().await.unwrap(),
        r#"{"city":"São Paulo","temp_C":25.0,"temp_F":77.0,"temp_K":298.0}"#
    );

    shutdown.trigger();
}

#[tokio::test]
async fn relays_downstream_errors_too() {
    let downstream = common::start_fixed_upstream(404, r#"can not find zipcode"#).await;

    let config = gateway_config(downstream);
    let (addr, shutdown) = common::serve_router(lookup_relay::http::gateway::router(&config)).await;

    let res = common::test_client()
        .post(format!("http://{}", addr))
        .json(&serde_json::json!({"cep": "99999999"}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 404);
    assert_eq!(res.text().await.unwrap(), "can not find zipcode");

    shutdown.trigger();
}

#[tokio::test]
async fn malformed_code_never_reaches_the_downstream_hop() {
    let calls = Arc::new(AtomicU32::new(0));
    let c = calls.clone();
    let downstream = common::start_mock_upstream(move || {
        let c = c.clone();
        async move {
            c.fetch_add(1, Ordering::SeqCst);
            (200, "{}".to_string())
        }
    })
    .await;

    let config = gateway_config(downstream);
    let (addr, shutdown) = common::serve_router(lookup_relay::http::gateway::router(&config)).await;

    let res = common::test_client()
        .post(format!("http://{}", addr))
        .json(&serde_json::json!({"cep": "01310-100"}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 422);
    assert_eq!(res.text().await.unwrap(), "invalid zipcode");
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    shutdown.trigger();
}

#[tokio::test]
async fn unreachable_downstream_is_an_internal_error() {
    // Reserve a port, then free it so nothing listens there.
    let unused = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead_addr = unused.local_addr().unwrap();
    drop(unused);

    let config = gateway_config(dead_addr);
    let (addr, shutdown) = common::serve_router(lookup_relay::http::gateway::router(&config)).await;

    let res = common::test_client()
        .post(format!("http://{}", addr))
        .json(&serde_json::json!({"cep": "01310100"}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 500);

    shutdown.trigger();
}
