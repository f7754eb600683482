use super::{ClientState, ConnectionManager, RelayClientBuilder, RelayClientOptions};
use crate::messaging::{ListenerId, MessageRouter, SocketEvent, SystemEvent};
use crate::retry::RetryTimer;
use crate::types::constants::disconnect_reasons;
use crate::types::{RelayError, RelayMessage, Result};
use crate::websocket::WebSocketFactory;
use futures::stream::StreamExt;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Client handle for a realtime socket connection.
///
/// `RelayClient` owns the WebSocket transport, tracks a single
/// connected/disconnected flag, relays lifecycle events to the diagnostic
/// log, and fans application events out to registered listeners. Dropped
/// links are re-dialed automatically per the configured
/// [`RetryPolicy`](crate::retry::RetryPolicy) until `disconnect()` is called.
///
/// Construction performs no network activity; call [`connect()`](Self::connect)
/// to bring the link up. Transport failures are never returned from methods;
/// they surface as lifecycle events and log lines.
///
/// # Example
///
/// ```no_run
/// use socket_relay::{RelayClient, RelayClientOptions};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = RelayClient::new("wss://example.test/socket", RelayClientOptions::default())?;
///
/// client.on("message", |payload| println!("message: {payload}")).await;
/// client.connect().await;
/// client.emit("message", serde_json::json!({ "body": "hello" })).await;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct RelayClient {
    pub(crate) endpoint: String,
    pub(crate) options: RelayClientOptions,

    // Transport write half + connected flag
    pub(crate) connection: Arc<ConnectionManager>,

    // Consolidated mutable state
    pub(crate) state: Arc<RwLock<ClientState>>,
}

impl RelayClient {
    /// Creates a new client for the given endpoint.
    ///
    /// Validates the endpoint URL (`ws`/`wss` only) and spawns the
    /// reconnection watcher; no connection attempt is made here.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::UrlParse`] for a malformed endpoint and
    /// [`RelayError::Config`] for an unsupported scheme.
    pub fn new(endpoint: impl Into<String>, options: RelayClientOptions) -> Result<Self> {
        RelayClientBuilder::new(endpoint, options).map(|builder| builder.build())
    }

    /// The endpoint this client dials.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Whether the link is currently up.
    pub async fn is_connected(&self) -> bool {
        self.connection.is_connected().await
    }

    /// Brings the link up.
    ///
    /// A no-op while already connected. On a successful handshake the
    /// `connect` lifecycle event fires; on failure `connect_error` fires and
    /// the retry loop takes over per the configured policy. Outcomes are
    /// observed via [`on()`](Self::on), never returned.
    pub async fn connect(&self) {
        if self.is_connected().await {
            tracing::debug!("connect() ignored, already connected");
            return;
        }

        self.set_manual_disconnect(false).await;

        if let Err(e) = self.establish().await {
            self.dispatch_lifecycle(SystemEvent::ConnectError, Value::String(e.to_string()))
                .await;

            // Hand over to the retry loop.
            let state = self.state.read().await;
            state.notify_link_change(false, state.was_manual_disconnect);
        }
    }

    /// Tears the link down.
    ///
    /// Always instructs the transport to disconnect, whatever the current
    /// flag says, and marks the disconnect as manual so the retry loop stays
    /// out of the way. Fires `disconnect` with reason `"client disconnect"`
    /// if the link was up.
    pub async fn disconnect(&self) {
        self.set_manual_disconnect(true).await;

        let was_connected = self.is_connected().await;

        {
            let mut state = self.state.write().await;
            state.tasks.abort_all();
        }

        if let Err(e) = self.connection.close().await {
            tracing::debug!("Close handshake failed: {}", e);
        }

        if was_connected {
            self.dispatch_lifecycle(
                SystemEvent::Disconnect,
                Value::String(disconnect_reasons::CLIENT.to_string()),
            )
            .await;
        }
    }

    /// Registers a callback for an event.
    ///
    /// Registrations accumulate: every callback bound to the event runs, in
    /// registration order, each time it fires. Lifecycle events can be
    /// observed the same way by passing a [`SystemEvent`]. The event name is
    /// not validated.
    pub async fn on<F>(&self, event: impl Into<SocketEvent>, callback: F) -> ListenerId
    where
        F: Fn(Value) + Send + Sync + 'static,
    {
        let mut state = self.state.write().await;
        state.listeners.bind(event.into(), callback)
    }

    /// Removes a previously registered callback, or every callback for the
    /// event when `listener` is `None`.
    pub async fn off(&self, event: impl Into<SocketEvent>, listener: Option<ListenerId>) {
        let event = event.into();
        let mut state = self.state.write().await;
        match listener {
            Some(id) => {
                state.listeners.unbind(&event, id);
            }
            None => {
                state.listeners.unbind_all(&event);
            }
        }
    }

    /// Sends `payload` to the peer tagged with `event`.
    ///
    /// Best effort: no acknowledgment, and payloads sent while disconnected
    /// are dropped.
    pub async fn emit(&self, event: impl Into<SocketEvent>, payload: Value) {
        let message = RelayMessage::new(event.into(), payload);
        let event_name = message.event.to_string();

        match self.connection.send(message).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::debug!("Dropped '{}' emit, transport not connected", event_name);
            }
            Err(e) => {
                tracing::warn!("Failed to send '{}': {}", event_name, e);
            }
        }
    }

    /// Dial, install the write half, fire `connect` and spawn the read task.
    async fn establish(&self) -> Result<()> {
        let ws_stream = match self.options.connect_timeout {
            Some(ms) => tokio::time::timeout(
                Duration::from_millis(ms),
                WebSocketFactory::create(&self.endpoint),
            )
            .await
            .map_err(|_| RelayError::ConnectTimeout(ms))??,
            None => WebSocketFactory::create(&self.endpoint).await?,
        };

        let (write_half, mut read_half) = ws_stream.split();
        self.connection.set_writer(write_half).await;

        self.dispatch_lifecycle(SystemEvent::Connect, Value::Null)
            .await;

        let router = MessageRouter::new_with_state(Arc::clone(&self.state));
        let client = self.clone();
        let mut state = self.state.write().await;
        state.tasks.spawn(async move {
            use tokio_tungstenite::tungstenite::Message;

            tracing::debug!("Read task started");
            let mut reason: Option<String> = None;

            while let Some(frame) = read_half.next().await {
                match frame {
                    Ok(Message::Text(text)) => {
                        match serde_json::from_str::<RelayMessage>(&text) {
                            Ok(message) => router.route(message).await,
                            Err(e) => {
                                tracing::error!(
                                    "Failed to parse incoming message: {} - raw: {}",
                                    e,
                                    text
                                );
                            }
                        }
                    }
                    Ok(Message::Close(frame)) => {
                        reason = Some(
                            frame
                                .filter(|f| !f.reason.is_empty())
                                .map(|f| f.reason.to_string())
                                .unwrap_or_else(|| {
                                    disconnect_reasons::TRANSPORT_CLOSE.to_string()
                                }),
                        );
                        break;
                    }
                    Ok(Message::Ping(data)) => {
                        tracing::trace!("Ping ({} bytes)", data.len());
                    }
                    Ok(Message::Pong(data)) => {
                        tracing::trace!("Pong ({} bytes)", data.len());
                    }
                    Ok(Message::Binary(data)) => {
                        tracing::warn!("Ignoring unexpected binary frame ({} bytes)", data.len());
                    }
                    Ok(Message::Frame(_)) => {}
                    Err(e) => {
                        tracing::error!("WebSocket read error: {}", e);
                        reason = Some(disconnect_reasons::TRANSPORT_ERROR.to_string());
                        break;
                    }
                }
            }

            // A stream that ends without a close frame counts as an abrupt
            // transport close.
            let reason =
                reason.unwrap_or_else(|| disconnect_reasons::TRANSPORT_CLOSE.to_string());

            if client.is_connected().await {
                client.connection.clear_writer().await;
                client
                    .dispatch_lifecycle(SystemEvent::Disconnect, Value::String(reason))
                    .await;
            }
            tracing::debug!("Read task finished");
        });

        Ok(())
    }

    /// Lifecycle event relay: flag effect, diagnostic line, listener fan-out,
    /// link-watcher notification. Never errors and never alters retry timing.
    pub(crate) async fn dispatch_lifecycle(&self, event: SystemEvent, payload: Value) {
        match event {
            SystemEvent::Connect => {
                self.connection.set_connected(true).await;
                tracing::info!("Connected to {}", self.endpoint);
            }
            SystemEvent::Disconnect => {
                self.connection.set_connected(false).await;
                tracing::warn!("Disconnected: {}", payload.as_str().unwrap_or("unknown"));
            }
            SystemEvent::ConnectError => {
                tracing::error!("Connection error: {}", payload.as_str().unwrap_or("unknown"));
            }
            SystemEvent::ReconnectAttempt => {
                tracing::info!("Reconnection attempt #{}", payload.as_u64().unwrap_or(0));
            }
            SystemEvent::ReconnectFailed => {
                tracing::error!("Reconnection failed.");
            }
        }

        // Callers observe lifecycle outcomes only through these bindings.
        let callbacks = {
            let state = self.state.read().await;
            state.listeners.callbacks_for(&SocketEvent::System(event))
        };
        for callback in callbacks {
            callback(payload.clone());
        }

        if matches!(event, SystemEvent::Connect | SystemEvent::Disconnect) {
            let state = self.state.read().await;
            state.notify_link_change(
                matches!(event, SystemEvent::Connect),
                state.was_manual_disconnect,
            );
        }
    }

    /// Retry loop run by the link watcher after an unexpected disconnect.
    ///
    /// Sleeps the policy's fixed delay before each attempt, fires
    /// `reconnect_attempt`/`connect_error` along the way, and gives up with
    /// `reconnect_failed` once the attempt cap is reached. A `disconnect()`
    /// call stops it.
    pub(crate) async fn run_retry_loop(&self) {
        let mut timer = RetryTimer::new(self.options.retry.clone());

        loop {
            if self.state.read().await.was_manual_disconnect {
                tracing::debug!("Manual disconnect, stopping retry loop");
                return;
            }
            if self.is_connected().await {
                return;
            }

            let Some(attempt) = timer.next_attempt() else {
                self.dispatch_lifecycle(SystemEvent::ReconnectFailed, Value::Null)
                    .await;
                return;
            };

            timer.wait().await;

            // disconnect() may have been called while we slept.
            if self.state.read().await.was_manual_disconnect {
                tracing::debug!("Manual disconnect, stopping retry loop");
                return;
            }

            self.dispatch_lifecycle(SystemEvent::ReconnectAttempt, Value::from(attempt))
                .await;

            match self.establish().await {
                Ok(()) => return,
                Err(e) => {
                    self.dispatch_lifecycle(
                        SystemEvent::ConnectError,
                        Value::String(e.to_string()),
                    )
                    .await;
                }
            }
        }
    }

    async fn set_manual_disconnect(&self, manual: bool) {
        let mut state = self.state.write().await;
        state.was_manual_disconnect = manual;
    }
}
