//! Typed HTTP request layer
//!
//! - [`request`]: request descriptions tagged with their payload type
//! - [`transport`]: the network seam and its reqwest implementation
//! - [`envelope`]: `{code, message, data}` unwrapping
//! - [`client`]: the interceptor pipeline tying them together

pub mod client;
pub mod envelope;
pub mod request;
pub mod transport;

pub use client::ApiClient;
pub use envelope::unwrap_envelope;
pub use request::{ApiRequest, Method, RequestBody, RequestSpec};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
