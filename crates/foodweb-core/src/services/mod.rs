//! Request builders per backend resource
//!
//! Each function maps typed input to an [`ApiRequest`](crate::http::ApiRequest)
//! whose type parameter is the payload the backend answers with. Nothing here
//! touches the network; pass the result to
//! [`ApiClient::send`](crate::http::ApiClient::send).
//!
//! Mutations whose response payload the client never inspects are typed as
//! [`serde_json::Value`].

pub mod category;
pub mod dish;
pub mod file;
pub mod user;
