//! Shared utilities for integration testing.

use std::net::SocketAddr;

use axum::Router;
use backend_kit::{HttpServer, KitConfig};
use tokio::net::TcpListener;

/// Serve `router` on an ephemeral local port.
pub async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    addr
}

/// Start the demo service with `config` on an ephemeral local port.
#[allow(dead_code)]
pub async fn start_service(config: KitConfig) -> SocketAddr {
    let server = HttpServer::new(config).unwrap();
    serve(server.router()).await
}

/// A client that never reuses connections between tests.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .build()
        .unwrap()
}
