//! Shared utilities for the integration tests.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Start a programmable mock upstream on an ephemeral port.
///
/// The closure decides each response's status and JSON body; delays are
/// simulated by sleeping inside it. The request head is drained before the
/// response is written so clients finish sending their bodies.
pub async fn start_mock_upstream<F, Fut>(f: F) -> SocketAddr
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let mut buf = [0u8; 4096];
                        let _ = socket.read(&mut buf).await;

                        let (status, body) = f().await;
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            408 => "408 Request Timeout",
                            422 => "422 Unprocessable Entity",
                            500 => "500 Internal Server Error",
                            _ => "200 OK",
                        };

                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a mock upstream that always returns the same response.
#[allow(dead_code)]
pub async fn start_fixed_upstream(status: u16, body: &'static str) -> SocketAddr {
    start_mock_upstream(move || async move { (status, body.to_string()) }).await
}

/// Serve a relay router (with the standard middleware) on an ephemeral
/// port. The returned guard keeps the server alive; dropping it stops it.
#[allow(dead_code)]
pub async fn serve_router(router: axum::Router) -> (SocketAddr, lookup_relay::Shutdown) {
    let shutdown = lookup_relay::Shutdown::new();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let rx = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = lookup_relay::http::serve(listener, lookup_relay::http::with_middleware(router), rx)
            .await;
    });

    (addr, shutdown)
}

/// A reqwest client that never pools connections across tests.
#[allow(dead_code)]
pub fn test_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
