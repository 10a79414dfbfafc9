//! Shared test fixtures: a scripted transport double.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use zotero_client::{HttpError, HttpRequest, HttpResponse, Transport};

/// Answers requests from a scripted queue and records everything sent.
/// When the queue runs dry it answers 200 with an empty JSON array.
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn push_ok(&self, body: &str) {
        self.responses.lock().unwrap().push_back(Ok(HttpResponse {
            status: 200,
            status_text: "OK".to_string(),
            body: body.to_string(),
            headers: HashMap::new(),
        }));
    }

    pub fn push_status(&self, status: u16, status_text: &str) {
        self.responses.lock().unwrap().push_back(Ok(HttpResponse {
            status,
            status_text: status_text.to_string(),
            body: String::new(),
            headers: HashMap::new(),
        }));
    }

    pub fn push_error(&self, error: HttpError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.lock().unwrap().push(request);
        self.responses.lock().unwrap().pop_front().unwrap_or_else(|| {
            Ok(HttpResponse {
                status: 200,
                status_text: "OK".to_string(),
                body: "[]".to_string(),
                headers: HashMap::new(),
            })
        })
    }
}
