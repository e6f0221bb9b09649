//! Transport seam between the API client and the network
//!
//! [`ApiClient`](super::ApiClient) never talks to reqwest directly; it hands
//! a fully prepared [`HttpRequest`] to a [`Transport`]. Production code uses
//! [`ReqwestTransport`]; tests substitute a stub.

use super::request::{Method, RequestBody};
use crate::config::ClientConfig;
use crate::error::{FoodwebError, FoodwebResult};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::debug;

/// Request with an absolute URL and final headers
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw response: status and body bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx check
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes prepared requests
///
/// Implementations report network failures and timeouts as
/// [`FoodwebError::Transport`]; any HTTP status, including errors, is a
/// successful execution.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> FoodwebResult<HttpResponse>;
}

/// reqwest-backed transport with a single overall deadline
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Build the HTTP client from configuration
    pub fn new(config: &ClientConfig) -> FoodwebResult<Self> {
        let timeout = config.timeout();
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FoodwebError::config(format!("Failed to create HTTP client: {}", e)))?;

        debug!("Created HTTP client with timeout={}s", config.timeout_secs);
        Ok(Self { client, timeout })
    }

    fn map_error(&self, error: reqwest::Error) -> FoodwebError {
        if error.is_timeout() {
            FoodwebError::timeout(format!(
                "timeout of {}ms exceeded",
                self.timeout.as_millis()
            ))
        } else if error.is_connect() {
            FoodwebError::transport(format!("Network Error: {}", error))
        } else {
            FoodwebError::transport(error.to_string())
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> FoodwebResult<HttpResponse> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &request.url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart { field, file } => {
                let part = Part::bytes(file.bytes)
                    .file_name(file.filename)
                    .mime_str(&file.content_type)
                    .map_err(|e| FoodwebError::invalid_input(format!("Invalid file type: {}", e)))?;
                builder.multipart(Form::new().part(field, part))
            }
        };

        let response = builder.send().await.map_err(|e| self.map_error(e))?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| self.map_error(e))?;

        Ok(HttpResponse::new(status, body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let request = HttpRequest {
            method: Method::Get,
            url: "http://localhost/api".to_string(),
            headers: vec![("Authorization".to_string(), "Bearer t".to_string())],
            query: vec![],
            body: RequestBody::Empty,
        };
        assert_eq!(request.header("authorization"), Some("Bearer t"));
        assert_eq!(request.header("x-missing"), None);
    }

    #[test]
    fn test_response_success_range() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(401, "").is_success());
        assert!(!HttpResponse::new(500, "").is_success());
    }

    #[test]
    fn test_transport_builds_from_config() {
        let transport = ReqwestTransport::new(&ClientConfig::default()).unwrap();
        assert_eq!(transport.timeout, Duration::from_secs(10));
    }
}
