//! Shared test helpers and mock transport.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Semaphore;

use recette::codec::GenerationRequest;
use recette::error::RecetteError;
use recette::orchestrator::{StateSink, StateTransition};
use recette::transport::{RawResponse, Transport};

/// A mock transport that returns canned responses and records requests.
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<RawResponse, RecetteError>>>,
    requests: Mutex<Vec<GenerationRequest>>,
    calls: AtomicUsize,
    gate: Option<Semaphore>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            gate: None,
        }
    }

    /// Responses are held until [`MockTransport::release`] is called, once per
    /// response.
    pub fn gated() -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::new()
        }
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    /// Queue a raw status + body response.
    pub fn queue_response(&self, status: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(RawResponse::new(status, body.as_bytes().to_vec())));
    }

    /// Queue a successful chat-completions response carrying `content`.
    pub fn queue_recipe(&self, content: &str) {
        let body = serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": content}}]
        });
        self.queue_response(200, &body.to_string());
    }

    /// Queue a transport-level failure.
    pub fn queue_network_error(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(RecetteError::Network(message.to_string())));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &GenerationRequest) -> Result<RawResponse, RecetteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        if let Some(gate) = &self.gate {
            gate.acquire().await.expect("gate closed").forget();
        }

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(RecetteError::Network("no response queued".into())))
    }
}

/// A transport whose send panics.
pub struct PanickingTransport;

#[async_trait]
impl Transport for PanickingTransport {
    async fn send(&self, _request: &GenerationRequest) -> Result<RawResponse, RecetteError> {
        panic!("transport bug")
    }
}

/// Sink that records every transition it receives.
pub fn recording_sink() -> (StateSink, Arc<Mutex<Vec<StateTransition>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink_seen = Arc::clone(&seen);
    let sink: StateSink = Arc::new(move |t: &StateTransition| {
        sink_seen.lock().unwrap().push(t.clone());
    });
    (sink, seen)
}
