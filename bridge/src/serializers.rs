//! Serialization of result envelopes for transport.

use crate::{BridgeError, BridgeResult, Envelope};

/// Serialize an envelope to JSON.
///
/// The variant tag is carried in a `type` field, so a consumer can dispatch
/// the same way [`Envelope::render`] does.
pub fn to_json(envelope: &Envelope) -> BridgeResult<String> {
    serde_json::to_string(envelope)
        .map_err(|e| BridgeError::Engine(format!("JSON serialization error: {}", e)))
}
