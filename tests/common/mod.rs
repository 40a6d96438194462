//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use apm_demo::config::AppConfig;
use apm_demo::observability::TransactionNamer;
use apm_demo::{HttpServer, Shutdown};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

/// Config pointing the weather client at `upstream` (or nowhere) with a short wait.
pub fn test_config(upstream: Option<SocketAddr>, wait_delay_ms: u64) -> AppConfig {
    let mut config = AppConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.wait.delay_ms = wait_delay_ms;
    config.weather.use_system_proxy = false;
    if let Some(addr) = upstream {
        config.weather.base_url = format!("http://{}", addr);
    }
    config
}

/// Start a stub upstream answering every request with `status` and `body`.
///
/// Each request's request line (e.g. `GET /london?format=3 HTTP/1.1`) is sent
/// on the returned channel.
pub async fn start_mock_upstream(
    status: &'static str,
    body: &'static [u8],
) -> (SocketAddr, mpsc::UnboundedReceiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        let mut buf = vec![0u8; 8192];
                        let mut read = 0;
                        // Read until the end of the request head.
                        loop {
                            match socket.read(&mut buf[read..]).await {
                                Ok(0) | Err(_) => break,
                                Ok(n) => {
                                    read += n;
                                    if buf[..read].windows(4).any(|w| w == b"\r\n\r\n")
                                        || read == buf.len()
                                    {
                                        break;
                                    }
                                }
                            }
                        }

                        let head = String::from_utf8_lossy(&buf[..read]);
                        if let Some(line) = head.lines().next() {
                            let _ = tx.send(line.to_string());
                        }

                        let head = format!(
                            "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                            status,
                            body.len()
                        );
                        let _ = socket.write_all(head.as_bytes()).await;
                        let _ = socket.write_all(body).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, rx)
}

/// An address nothing is listening on.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Run a real server on an ephemeral port.
pub async fn spawn_server(server: HttpServer) -> (SocketAddr, Shutdown) {
    let shutdown = Shutdown::new();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// HTTP client that never goes through a system proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Captures every transaction name it is given.
#[derive(Default)]
pub struct RecordingNamer {
    names: Mutex<Vec<String>>,
}

impl RecordingNamer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn names(&self) -> Vec<String> {
        self.names.lock().unwrap().clone()
    }
}

impl TransactionNamer for RecordingNamer {
    fn name_transaction(&self, name: &str) {
        self.names.lock().unwrap().push(name.to_string());
    }
}
