//! API request and response types
//!
//! Field names follow the backend's camelCase JSON.

mod category;
mod dish;
mod envelope;
mod file;
mod user;

pub use category::{Category, CategoryRequest};
pub use dish::{Dish, DishRequest, DishSearchParams};
pub use envelope::{ApiEnvelope, PageResponse, Pageable};
pub use file::{FileUpload, FileUploadResponse};
pub use user::{LoginRequest, LoginResponse, RegisterRequest, User};

use serde::{Deserialize, Serialize};

/// Backend timestamp
///
/// The backend is not consistent here: some records carry formatted date
/// strings, others epoch numbers. Both are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Epoch(i64),
    Text(String),
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Timestamp::Epoch(secs) => write!(f, "{}", secs),
            Timestamp::Text(text) => f.write_str(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_accepts_both_shapes() {
        let epoch: Timestamp = serde_json::from_str("1700000000").unwrap();
        assert_eq!(epoch, Timestamp::Epoch(1_700_000_000));

        let text: Timestamp = serde_json::from_str("\"2025-03-01T12:00:00\"").unwrap();
        assert_eq!(text.to_string(), "2025-03-01T12:00:00");
    }
}
