//! Readyview client core: event reconciliation and presentation
//! selection for the situational-awareness display.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐   ChannelEvent    ┌────────────┐   watch<View>   ┌───────────┐
//! │ PushChannel │ ────────────────► │ Dispatcher │ ──────────────► │ rendering │
//! │ (transport, │   (one ordered    │ (owns the  │  (selected      │  layer    │
//! │  decoding)  │    mpsc queue)    │  AppState) │   view)         │ (external)│
//! └─────────────┘                   └────────────┘                 └───────────┘
//! ```
//!
//! The connection manager decodes frames and forwards a tagged
//! [`ChannelEvent`] into a single queue. The dispatcher is the only
//! writer of [`AppState`]; after each data event it re-runs the pure
//! [`select`] rule and publishes the resulting [`View`]. The rendering
//! layer (external to this core) observes the watch channel and
//! redraws.

pub mod channel;
pub mod config;
pub mod dispatch;
pub mod store;
pub mod view;

pub use channel::{ChannelEvent, ConnectionState, PushChannel, ReconnectConfig};
pub use config::Config;
pub use dispatch::Dispatcher;
pub use store::AppState;
pub use view::{select, View};
