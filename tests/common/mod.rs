//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use blog_posts::{HttpServer, PostStore, ServerConfig, Shutdown};
use tokio::net::TcpListener;

/// A running server bound to an ephemeral local port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub store: PostStore,
    pub shutdown: Shutdown,
    handle: tokio::task::JoinHandle<Result<(), std::io::Error>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Trigger shutdown and wait for the server task to finish.
    #[allow(dead_code)]
    pub async fn stop(self) {
        self.shutdown.trigger();
        let _ = tokio::time::timeout(Duration::from_secs(5), self.handle).await;
    }
}

/// Start a server with default settings and the seed posts.
pub async fn start_server() -> TestServer {
    start_server_with(ServerConfig::default()).await
}

/// Start a server with `config`, forcing a loopback ephemeral listener.
pub async fn start_server_with(mut config: ServerConfig) -> TestServer {
    config.listener.host = "127.0.0.1".into();
    config.listener.port = 0;

    let listener = TcpListener::bind(config.listener.bind_address())
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(config).unwrap();
    let store = server.store().clone();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    let handle = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    TestServer {
        addr,
        store,
        shutdown,
        handle,
    }
}

/// A client that never reuses connections or goes through a proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
