//! Shared types for the readyview push protocol: wire frames, decoded
//! event models, and decode errors. No I/O lives here, so both the
//! client and a future event producer can depend on this crate.

pub mod error;
pub mod models;
pub mod protocol;

pub use error::*;
pub use models::*;
pub use protocol::*;
