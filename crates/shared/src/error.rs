//! Decode errors for inbound push frames.
//!
//! None of these is fatal: the client drops the offending frame, reports
//! it, and leaves prior state untouched.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    /// The frame text is not a valid frame at all.
    #[error("invalid push frame: {0}")]
    Frame(#[source] serde_json::Error),

    /// The frame names an event this client does not consume.
    #[error("unknown event {0:?}")]
    UnknownEvent(String),

    /// The payload is not valid JSON or does not match the expected shape
    /// for its event (e.g. an inventory payload missing a category key).
    /// Shape errors reject the whole update; nothing is partially applied.
    #[error("invalid {event} payload: {source}")]
    Payload {
        event: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
