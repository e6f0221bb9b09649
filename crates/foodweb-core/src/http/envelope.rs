//! Envelope unwrapping

use crate::error::{FoodwebError, FoodwebResult};
use crate::types::ApiEnvelope;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode a response body and return its `data`
///
/// The code is checked before `data` is decoded, so a failed call whose
/// `data` does not match `T` still reports the backend's message. A missing
/// or `null` `data` decodes as JSON `null`, which suits `()`, `Option<_>` and
/// [`Value`] payloads and fails for everything else.
pub fn unwrap_envelope<T: DeserializeOwned>(body: &[u8]) -> FoodwebResult<T> {
    let envelope: ApiEnvelope<Value> = serde_json::from_slice(body)
        .map_err(|e| FoodwebError::decode(format!("invalid response envelope: {}", e)))?;

    if !envelope.is_success() {
        return Err(FoodwebError::api(envelope.code, envelope.message));
    }

    let data = envelope.data.unwrap_or(Value::Null);
    serde_json::from_value(data).map_err(|e| FoodwebError::decode(e.to_string()))
}
