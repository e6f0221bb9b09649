//! Foodweb Client Core Library
//!
//! This crate provides the client side of the food-recommendation platform:
//! the typed API layer, session handling, the admin tab manager, the route
//! table with its guard, and the context that wires them together.

pub mod auth;
pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod navigation;
pub mod notify;
pub mod router;
pub mod services;
pub mod tabs;
pub mod testing;
pub mod types;

// Re-export commonly used types
pub use auth::{SessionStore, SessionView, SharedSession};
pub use config::{ClientConfig, ConfigLoader, ConfigSource};
pub use context::{FoodwebContext, FoodwebContextBuilder};
pub use error::{ErrorKind, FoodwebError, FoodwebResult};
pub use http::{ApiClient, ApiRequest, Method, RequestSpec, Transport};
pub use navigation::Navigator;
pub use notify::{Notifier, TracingNotifier};
pub use router::{AppRouter, NavigationOutcome, ResolvedRoute, RouteTable};
pub use tabs::{TagView, TagsStore};
pub use types::*;
