//! Push-channel connection manager over tokio-tungstenite.
//!
//! Owns the WebSocket lifecycle, decodes inbound frames, and forwards
//! tagged [`ChannelEvent`]s through one ordered queue to the dispatch
//! loop. It never interprets business state itself; the store and
//! selector see only fully decoded events.

use futures_util::StreamExt;
use readyview_shared::{decode_frame, Alert, Inventory, PushPayload};
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::{connect_async, tungstenite::Message};

/// Connection state for the push channel, for diagnostics only; no
/// business logic depends on it.
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Reconnecting { attempt: u32 },
    Failed { reason: String },
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected)
    }

    pub fn is_connecting(&self) -> bool {
        matches!(
            self,
            ConnectionState::Connecting | ConnectionState::Reconnecting { .. }
        )
    }
}

/// Configuration for auto-reconnect behavior
#[derive(Debug, Clone)]
pub struct ReconnectConfig {
    /// Maximum number of reconnect attempts (0 = infinite)
    pub max_attempts: u32,
    /// Initial delay in milliseconds
    pub initial_delay_ms: u32,
    /// Maximum delay in milliseconds
    pub max_delay_ms: u32,
    /// Multiplier for exponential backoff
    pub backoff_multiplier: f32,
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            initial_delay_ms: 1000,
            max_delay_ms: 30000,
            backoff_multiplier: 1.5,
        }
    }
}

impl ReconnectConfig {
    /// Calculate delay for a given attempt number
    pub fn delay_for_attempt(&self, attempt: u32) -> u32 {
        let delay = self.initial_delay_ms as f32 * self.backoff_multiplier.powi(attempt as i32);
        (delay as u32).min(self.max_delay_ms)
    }
}

/// Everything the dispatch loop can receive, in one tagged union.
/// Lifecycle and data events share the queue so a test can replay any
/// sequence deterministically.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelEvent {
    Connected,
    Disconnected,
    Alert(Alert),
    Inventory(Inventory),
}

impl From<PushPayload> for ChannelEvent {
    fn from(payload: PushPayload) -> Self {
        match payload {
            PushPayload::Earthquake(alert) => ChannelEvent::Alert(alert),
            PushPayload::Inventory(snapshot) => ChannelEvent::Inventory(snapshot),
        }
    }
}

/// A managed connection to the push channel.
///
/// Dropping the handle does not stop the connection loop; the loop ends
/// when the event receiver is dropped or reconnection gives up.
pub struct PushChannel {
    url: String,
    state: watch::Receiver<ConnectionState>,
}

impl PushChannel {
    /// Connect with the default reconnect policy.
    pub fn connect(url: impl Into<String>, events: mpsc::UnboundedSender<ChannelEvent>) -> Self {
        Self::connect_with(url, events, ReconnectConfig::default())
    }

    /// Connect with an explicit reconnect policy. Spawns the connection
    /// loop in a background task; events start flowing into `events` as
    /// soon as the channel is up.
    pub fn connect_with(
        url: impl Into<String>,
        events: mpsc::UnboundedSender<ChannelEvent>,
        reconnect: ReconnectConfig,
    ) -> Self {
        let url = url.into();
        let (state_tx, state_rx) = watch::channel(ConnectionState::Disconnected);
        tokio::spawn(connection_loop(url.clone(), events, state_tx, reconnect));
        Self {
            url,
            state: state_rx,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Watch receiver for the connection state (diagnostics).
    pub fn state(&self) -> watch::Receiver<ConnectionState> {
        self.state.clone()
    }

    pub fn is_connected(&self) -> bool {
        self.state.borrow().is_connected()
    }
}

async fn connection_loop(
    url: String,
    events: mpsc::UnboundedSender<ChannelEvent>,
    state: watch::Sender<ConnectionState>,
    reconnect: ReconnectConfig,
) {
    let mut attempt = 0u32;

    loop {
        if attempt == 0 {
            state.send_replace(ConnectionState::Connecting);
        } else {
            state.send_replace(ConnectionState::Reconnecting { attempt });
        }

        match connect_async(url.as_str()).await {
            Ok((mut ws_stream, _response)) => {
                attempt = 0;
                state.send_replace(ConnectionState::Connected);
                tracing::info!("push channel connected to {}", url);
                if events.send(ChannelEvent::Connected).is_err() {
                    return;
                }

                while let Some(msg_result) = ws_stream.next().await {
                    match msg_result {
                        Ok(Message::Text(text)) => {
                            tracing::debug!("frame received: {}", text);
                            match decode_frame(&text) {
                                Ok(payload) => {
                                    if events.send(payload.into()).is_err() {
                                        // Dispatcher gone, stop for good
                                        return;
                                    }
                                }
                                // Undecodable frames are dropped; prior
                                // state stays untouched downstream
                                Err(e) => tracing::warn!("dropping frame: {}", e),
                            }
                        }
                        Ok(Message::Close(_)) => {
                            tracing::info!("push channel received close frame");
                            break;
                        }
                        Ok(Message::Ping(_)) => {
                            // Pong is handled automatically by tungstenite
                        }
                        Ok(_) => {
                            // Ignore binary, pong, etc.
                        }
                        Err(e) => {
                            tracing::error!("push channel read error: {}", e);
                            break;
                        }
                    }
                }

                state.send_replace(ConnectionState::Disconnected);
                // Downstream state survives a disconnect; the last known
                // data may still be the best available information
                if events.send(ChannelEvent::Disconnected).is_err() {
                    return;
                }
            }
            Err(e) => {
                tracing::error!("push channel connect failed for {}: {}", url, e);

                if reconnect.max_attempts > 0 && attempt >= reconnect.max_attempts {
                    state.send_replace(ConnectionState::Failed {
                        reason: format!(
                            "max reconnect attempts ({}) exceeded",
                            reconnect.max_attempts
                        ),
                    });
                    return;
                }

                let delay = reconnect.delay_for_attempt(attempt);
                tracing::info!(
                    "reconnecting to {} in {}ms (attempt {})",
                    url,
                    delay,
                    attempt + 1
                );
                tokio::time::sleep(tokio::time::Duration::from_millis(delay as u64)).await;
                attempt += 1;
            }
        }
    }
}
