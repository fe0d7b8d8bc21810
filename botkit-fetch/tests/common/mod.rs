//! Shared utilities for fetcher integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use botkit_fetch::{HttpError, OutboundRequest, RawResponse, Transport};
use std::collections::VecDeque;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

// ============================================================================
// Scripted transport
// ============================================================================

/// What the scripted transport does on one call.
#[derive(Debug, Clone)]
pub enum Step {
    /// Answer with this response.
    Respond(RawResponse),
    /// Never answer.
    Hang,
    /// Fail at the connection level.
    Fail(&'static str),
}

impl Step {
    pub fn json(status: u16, body: &str) -> Self {
        Self::Respond(RawResponse::new(status, Some("application/json"), body))
    }

    pub fn bytes(status: u16, content_type: &str, body: &[u8]) -> Self {
        Self::Respond(RawResponse::new(status, Some(content_type), body.to_vec()))
    }
}

/// Plays back a fixed script, then repeats the last step forever.
pub struct ScriptedTransport {
    steps: Mutex<VecDeque<Step>>,
    repeat: Step,
    calls: AtomicU32,
    seen: Mutex<Vec<OutboundRequest>>,
}

impl ScriptedTransport {
    pub fn new(steps: Vec<Step>) -> Arc<Self> {
        let mut steps: VecDeque<Step> = steps.into();
        let repeat = steps.pop_back().unwrap_or(Step::Fail("empty script"));
        Arc::new(Self {
            steps: Mutex::new(steps),
            repeat,
            calls: AtomicU32::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn always(step: Step) -> Arc<Self> {
        Self::new(vec![step])
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<OutboundRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &OutboundRequest) -> Result<RawResponse, HttpError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(request.clone());

        let step = self
            .steps
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.repeat.clone());

        match step {
            Step::Respond(response) => Ok(response),
            Step::Fail(message) => Err(HttpError::Connection(message.to_string())),
            Step::Hang => std::future::pending().await,
        }
    }
}

// ============================================================================
// Mock backend over TCP
// ============================================================================

/// A canned HTTP response for the TCP backend.
#[derive(Debug, Clone)]
pub struct Canned {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
    pub delay_ms: u64,
}

impl Canned {
    pub fn new(status: u16, content_type: &'static str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type,
            body: body.into(),
            delay_ms: 0,
        }
    }

    pub fn delayed(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }
}

/// Start a programmable backend on an ephemeral port.
///
/// `f` receives the request head (request line and headers) and returns
/// the response to write. Returns the bound address.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Canned> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let f = f.clone();
            tokio::spawn(async move {
                let head = read_head(&mut socket).await;
                let canned = f(head).await;
                if canned.delay_ms > 0 {
                    tokio::time::sleep(std::time::Duration::from_millis(canned.delay_ms)).await;
                }

                let mut response = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    canned.status,
                    reason(canned.status),
                    canned.content_type,
                    canned.body.len()
                )
                .into_bytes();
                response.extend_from_slice(&canned.body);

                let _ = socket.write_all(&response).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

async fn read_head(socket: &mut tokio::net::TcpStream) -> String {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => head.extend_from_slice(&buf[..n]),
        }
    }
    String::from_utf8_lossy(&head).into_owned()
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        204 => "No Content",
        404 => "Not Found",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}
