//! Test doubles for the client's seams
//!
//! These are used by this crate's unit tests and by integration tests that
//! drive a whole [`FoodwebContext`](crate::FoodwebContext) without a backend.

use crate::error::{FoodwebError, FoodwebResult};
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::navigation::Navigator;
use crate::notify::Notifier;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;

/// Transport that replays queued responses and records what it was sent
#[derive(Debug, Default)]
pub struct StubTransport {
    responses: Mutex<VecDeque<FoodwebResult<HttpResponse>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with a JSON body
    pub fn push_json(&self, status: u16, body: Value) {
        let bytes = body.to_string().into_bytes();
        self.responses
            .lock()
            .push_back(Ok(HttpResponse::new(status, bytes)));
    }

    /// Queue a successful envelope around `data`
    pub fn push_data(&self, data: Value) {
        self.push_json(
            200,
            serde_json::json!({"code": 200, "message": "success", "data": data}),
        );
    }

    /// Queue a transport failure
    pub fn push_error(&self, error: FoodwebError) {
        self.responses.lock().push_back(Err(error));
    }

    /// Requests received so far, oldest first
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    /// Most recent request
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().last().cloned()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn execute(&self, request: HttpRequest) -> FoodwebResult<HttpResponse> {
        self.requests.lock().push(request);
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(FoodwebError::transport("no stubbed response queued")))
    }
}

/// Navigator that only remembers where it was sent
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    paths: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn push(&self, path: &str) {
        self.paths.lock().push(path.to_string());
    }
}

/// Kind of a recorded notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Notifier that keeps every notification
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<(NoticeLevel, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<(NoticeLevel, String)> {
        self.notices.lock().clone()
    }

    /// Messages of error notifications only
    pub fn errors(&self) -> Vec<String> {
        self.notices
            .lock()
            .iter()
            .filter(|(level, _)| *level == NoticeLevel::Error)
            .map(|(_, message)| message.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.notices
            .lock()
            .push((NoticeLevel::Success, message.to_string()));
    }

    fn error(&self, message: &str) {
        self.notices
            .lock()
            .push((NoticeLevel::Error, message.to_string()));
    }
}
