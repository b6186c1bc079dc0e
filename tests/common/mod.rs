//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use url::Url;

use render_gateway::config::{BackendConfig, GatewayConfig};
use render_gateway::remote::BackendError;
use render_gateway::{RenderBackend, RenderParams};

/// Config with the given backend addresses and default everything else.
pub fn gateway_config(addresses: &[&str]) -> GatewayConfig {
    GatewayConfig {
        backends: addresses
            .iter()
            .enumerate()
            .map(|(i, address)| BackendConfig {
                name: format!("sd-{i}"),
                address: address.to_string(),
            })
            .collect(),
        ..GatewayConfig::default()
    }
}

/// In-process render transport with scriptable behavior.
pub struct MockRender {
    /// Image returned by successful renders.
    pub image: Vec<u8>,
    /// Whether pings succeed.
    pub reachable: AtomicBool,
    /// Whether renders succeed.
    pub generate_ok: AtomicBool,
    /// Number of pings observed (across all endpoints).
    pub pings: AtomicUsize,
    /// Number of render calls observed.
    pub renders: AtomicUsize,
    /// When set, renders block until a permit is released.
    pub block: Option<Arc<Semaphore>>,
}

impl MockRender {
    pub fn new(image: Vec<u8>) -> Self {
        Self {
            image,
            reachable: AtomicBool::new(true),
            generate_ok: AtomicBool::new(true),
            pings: AtomicUsize::new(0),
            renders: AtomicUsize::new(0),
            block: None,
        }
    }

    /// A transport where every ping and render fails.
    pub fn unreachable() -> Self {
        let mock = Self::new(Vec::new());
        mock.reachable.store(false, Ordering::SeqCst);
        mock.generate_ok.store(false, Ordering::SeqCst);
        mock
    }

    /// A transport whose renders park on `gate` until permits arrive.
    pub fn blocking(image: Vec<u8>, gate: Arc<Semaphore>) -> Self {
        Self {
            block: Some(gate),
            ..Self::new(image)
        }
    }
}

#[async_trait]
impl RenderBackend for MockRender {
    async fn generate(
        &self,
        _endpoint: &Url,
        _params: &RenderParams,
    ) -> Result<Vec<Vec<u8>>, BackendError> {
        self.renders.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.block {
            let permit = gate
                .acquire()
                .await
                .map_err(|_| BackendError::Connect("gate closed".to_string()))?;
            permit.forget();
        }
        if self.generate_ok.load(Ordering::SeqCst) {
            Ok(vec![self.image.clone()])
        } else {
            Err(BackendError::Status(500))
        }
    }

    async fn ping(&self, _endpoint: &Url) -> Result<(), BackendError> {
        self.pings.fetch_add(1, Ordering::SeqCst);
        if self.reachable.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(BackendError::Connect("connection refused".to_string()))
        }
    }
}

/// Start a programmable mock backend speaking just enough HTTP/1.1.
///
/// The handler receives the request path and body and returns a status code
/// plus a response body. Returns the bound address.
pub async fn start_backend<F, Fut>(handler: F) -> SocketAddr
where
    F: Fn(String, String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handler = Arc::new(handler);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let handler = handler.clone();
                    tokio::spawn(async move {
                        let Some((path, body)) = read_request(&mut socket).await else {
                            return;
                        };
                        let (status, response_body) = handler(path, body).await;
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            response_body.len(),
                            response_body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a mock Stable Diffusion backend.
///
/// Answers the txt2img route with the given image (base64-encoded into the
/// usual `images` array) and every other route with an empty JSON array, so
/// probes succeed too.
pub async fn start_sd_backend(image: Vec<u8>) -> SocketAddr {
    let encoded = BASE64.encode(image);
    start_backend(move |path, _body| {
        let encoded = encoded.clone();
        async move {
            if path.ends_with("/txt2img") {
                (200, format!(r#"{{"images": ["{encoded}"]}}"#))
            } else {
                (200, "[]".to_string())
            }
        }
    })
    .await
}

/// Read one request off the socket: request line, headers, then exactly
/// `Content-Length` body bytes. Closing without draining the body makes
/// clients see a reset instead of our response.
async fn read_request(socket: &mut tokio::net::TcpStream) -> Option<(String, String)> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find_header_end(&buf) {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let path = head
        .lines()
        .next()?
        .split_whitespace()
        .nth(1)
        .unwrap_or("/")
        .to_string();
    let content_length: usize = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse().ok())?
        })
        .unwrap_or(0);

    let mut body = buf[header_end + 4..].to_vec();
    while body.len() < content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }

    Some((path, String::from_utf8_lossy(&body).to_string()))
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}
