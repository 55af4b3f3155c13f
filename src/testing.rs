//! In-memory transport for unit tests
//!
//! Serves canned responses in order and records every request it receives,
//! so tests can assert on the exact URL and headers, or on the absence of any
//! request at all.

use crate::config::ClientConfig;
use crate::session::Session;
use crate::transport::{HttpRequest, HttpResponse, Transport, TransportError};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub(crate) const TEST_BASE_URL: &str = "https://api.test.invalid";

#[derive(Default)]
struct FakeState {
    responses: VecDeque<Result<HttpResponse, String>>,
    requests: Vec<HttpRequest>,
}

/// Cloneable handle; all clones share the same queue and request log.
#[derive(Clone, Default)]
pub(crate) struct FakeTransport {
    state: Arc<Mutex<FakeState>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response.
    pub fn respond(&self, status: u16, body: &str) -> &Self {
        self.state.lock().unwrap().responses.push_back(Ok(HttpResponse {
            status,
            body: body.to_string(),
        }));
        self
    }

    /// Queues a transport-level failure.
    pub fn fail(&self, message: &str) -> &Self {
        self.state
            .lock()
            .unwrap()
            .responses
            .push_back(Err(message.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests()
            .pop()
            .expect("no request was sent through the fake transport")
    }
}

impl Transport for FakeTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request.clone());

        let next = state
            .responses
            .pop_front()
            .unwrap_or_else(|| Err("no canned response left".to_string()));

        next.map_err(|message| TransportError::Request {
            method: request.method,
            url: request.url.to_string(),
            source: message.into(),
        })
    }
}

/// Anonymous session wired to `transport`.
pub(crate) fn session_with(transport: &FakeTransport) -> Session {
    let config = ClientConfig::new("test-key").with_base_url(TEST_BASE_URL);
    Session::with_transport(&config, transport.clone()).unwrap()
}
