//! Wire protocol for the readyview push channel.
//!
//! The channel carries named events, each with a JSON-encoded text
//! payload (the payload is itself a JSON document transported as a
//! string, matching the producer). This client consumes two data
//! events; connect/disconnect are transport lifecycle, not frames.

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::models::{Alert, Inventory};

pub const EVENT_EARTHQUAKE: &str = "earthquake";
pub const EVENT_INVENTORY: &str = "inventory";

/// A serialized push frame as it appears on the channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushFrame {
    pub event: String,
    pub data: String,
}

/// A fully decoded push payload.
#[derive(Debug, Clone, PartialEq)]
pub enum PushPayload {
    Earthquake(Alert),
    Inventory(Inventory),
}

/// Decode one frame of channel text into a payload.
pub fn decode_frame(text: &str) -> Result<PushPayload, DecodeError> {
    let frame: PushFrame = serde_json::from_str(text).map_err(DecodeError::Frame)?;
    decode_event(&frame.event, &frame.data)
}

/// Decode a named event's payload. Unknown event names are rejected so
/// the caller can report and drop them.
pub fn decode_event(event: &str, data: &str) -> Result<PushPayload, DecodeError> {
    match event {
        EVENT_EARTHQUAKE => serde_json::from_str(data)
            .map(PushPayload::Earthquake)
            .map_err(|source| DecodeError::Payload {
                event: EVENT_EARTHQUAKE,
                source,
            }),
        EVENT_INVENTORY => serde_json::from_str(data)
            .map(PushPayload::Inventory)
            .map_err(|source| DecodeError::Payload {
                event: EVENT_INVENTORY,
                source,
            }),
        other => Err(DecodeError::UnknownEvent(other.to_string())),
    }
}
