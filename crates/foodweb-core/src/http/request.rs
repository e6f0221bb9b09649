//! Request descriptions
//!
//! A [`RequestSpec`] says what to send; an [`ApiRequest`] additionally
//! records, in its type, what the envelope's `data` should decode into.

use crate::types::FileUpload;
use serde_json::Value;
use std::marker::PhantomData;

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    /// Sent as `application/json`
    Json(Value),
    /// Sent as `multipart/form-data` with a single file part
    Multipart { field: String, file: FileUpload },
}

/// Method, path, query and body of one API call
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub method: Method,
    /// Path relative to the configured base URL, e.g. `/api/admin/dish`
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl RequestSpec {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Append a query parameter
    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Append several query parameters
    pub fn with_query_pairs(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    /// Attach a JSON body
    pub fn with_json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    /// Attach a file as a multipart part named `field`
    pub fn with_file(mut self, field: impl Into<String>, file: FileUpload) -> Self {
        self.body = RequestBody::Multipart {
            field: field.into(),
            file,
        };
        self
    }
}

/// A request together with the type its payload decodes into
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest<T> {
    spec: RequestSpec,
    _payload: PhantomData<fn() -> T>,
}

impl<T> ApiRequest<T> {
    pub fn new(spec: RequestSpec) -> Self {
        Self {
            spec,
            _payload: PhantomData,
        }
    }

    pub fn spec(&self) -> &RequestSpec {
        &self.spec
    }

    pub fn into_spec(self) -> RequestSpec {
        self.spec
    }
}

impl<T> From<RequestSpec> for ApiRequest<T> {
    fn from(spec: RequestSpec) -> Self {
        Self::new(spec)
    }
}
