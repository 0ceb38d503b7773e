//! Endpoint operations, grouped by the provider's service domains.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, Result};

mod credit;
pub mod facility;
mod mpg;
mod oak;

/// Project the envelope's `result` object into a typed response.
pub(crate) fn result_object<T: DeserializeOwned>(envelope: &Value) -> Result<T> {
    let track_id = envelope
        .get("trackId")
        .and_then(Value::as_str)
        .map(str::to_owned);
    let result = envelope.get("result").cloned().unwrap_or(Value::Null);
    serde_json::from_value(result).map_err(|e| Error::Request {
        message: format!("unexpected response shape: {e}"),
        track_id,
    })
}
