//! Shared utilities for client tests.

#![allow(dead_code)]

use async_trait::async_trait;
use botkit_fetch::{Fetcher, HttpError, OutboundRequest, RawResponse, Transport};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Replays canned responses and records every request it sees.
///
/// Once the queue is empty the last response is repeated.
pub struct MockBackend {
    responses: Mutex<VecDeque<RawResponse>>,
    last: RawResponse,
    seen: Mutex<Vec<OutboundRequest>>,
}

impl MockBackend {
    pub fn new(responses: Vec<RawResponse>) -> Arc<Self> {
        let mut responses: VecDeque<RawResponse> = responses.into();
        let last = responses
            .pop_back()
            .unwrap_or_else(|| RawResponse::new(500, None, "empty mock"));
        Arc::new(Self {
            responses: Mutex::new(responses),
            last,
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn json(status: u16, body: &str) -> Arc<Self> {
        Self::new(vec![RawResponse::new(status, Some("application/json"), body)])
    }

    pub fn bytes(content_type: &str, body: &[u8]) -> Arc<Self> {
        Self::new(vec![RawResponse::new(200, Some(content_type), body.to_vec())])
    }

    pub fn no_content() -> Arc<Self> {
        Self::new(vec![RawResponse::new(204, None, Vec::new())])
    }

    pub fn requests(&self) -> Vec<OutboundRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub fn only_request(&self) -> OutboundRequest {
        let seen = self.requests();
        assert_eq!(seen.len(), 1, "expected exactly one request, got {}", seen.len());
        seen.into_iter().next().unwrap()
    }

    pub fn fetcher(self: &Arc<Self>, base_url: &str) -> Fetcher {
        Fetcher::with_transport(base_url, self.clone()).unwrap()
    }
}

#[async_trait]
impl Transport for MockBackend {
    async fn send(&self, request: &OutboundRequest) -> Result<RawResponse, HttpError> {
        self.seen.lock().unwrap().push(request.clone());
        let next = self.responses.lock().unwrap().pop_front();
        Ok(next.unwrap_or_else(|| self.last.clone()))
    }
}
