//! Response interpretation.
//!
//! Turns raw model text into typed values. Replies often wrap the JSON in
//! prose or markdown fences, so the payload is located by scanning for the
//! first `{` and the last `}` in the whole reply.
//!
//! The scan does not balance braces. It is correct when the payload is the
//! outermost and only brace-delimited structure in the reply; two separate
//! objects produce one span covering both, which then fails to decode.

use crate::models::Shape;
use crate::{Error, Result};
use serde::de::DeserializeOwned;

/// Locates the brace-delimited payload in a model reply.
///
/// Returns the substring from the first `{` through the last `}` inclusive.
///
/// # Errors
///
/// Returns [`Error::NoStructuredPayload`] if the reply has no `{`, no `}`, or
/// the last `}` comes before the first `{`.
pub fn extract_payload(raw: &str) -> Result<&str> {
    match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if end >= start => Ok(&raw[start..=end]),
        _ => {
            tracing::error!(
                raw = %raw,
                "Could not find a JSON object in the model reply"
            );
            Err(Error::NoStructuredPayload {
                raw: raw.to_string(),
            })
        },
    }
}

/// Extracts and decodes the payload embedded in a model reply.
///
/// No field-level validation is performed: a reply that decodes is returned
/// as-is, even when required fields came back empty. Empty fields are logged
/// at `warn` level.
///
/// # Errors
///
/// Returns [`Error::NoStructuredPayload`] if no payload region exists, or
/// [`Error::MalformedPayload`] if the region is not valid JSON for `T`.
pub fn interpret<T>(raw: &str) -> Result<T>
where
    T: DeserializeOwned + Shape,
{
    let payload = extract_payload(raw)?;
    decode(payload)
}

/// Decodes a whole reply as JSON without scanning for a payload region.
///
/// Used for replies produced under a server-enforced response schema, which
/// are expected to be pure JSON.
///
/// # Errors
///
/// Returns [`Error::MalformedPayload`] if the reply is not valid JSON for `T`.
pub fn decode_whole<T>(raw: &str) -> Result<T>
where
    T: DeserializeOwned + Shape,
{
    decode(raw.trim())
}

fn decode<T>(payload: &str) -> Result<T>
where
    T: DeserializeOwned + Shape,
{
    let value: T = serde_json::from_str(payload).map_err(|e| {
        tracing::error!(
            shape = T::NAME,
            payload = %payload,
            error = %e,
            "Failed to parse JSON from the model reply"
        );
        Error::MalformedPayload {
            payload: payload.to_string(),
            cause: e.to_string(),
        }
    })?;

    let missing = value.missing_fields();
    if !missing.is_empty() {
        tracing::warn!(
            shape = T::NAME,
            missing = ?missing,
            "Model reply decoded with empty required fields"
        );
    }

    Ok(value)
}
