use super::{ClientState, ConnectionManager, RelayClient};
use crate::retry::RetryPolicy;
use crate::types::{RelayError, Result};
use std::sync::Arc;
use tokio::sync::{watch, RwLock};
use url::Url;

/// Client configuration.
///
/// Every supported knob is an explicit field; there is no open-ended
/// key/value passthrough to the transport.
#[derive(Debug, Clone)]
pub struct RelayClientOptions {
    /// Reconnection schedule applied after an unexpected disconnect
    pub retry: RetryPolicy,
    /// Cap on the connect handshake, in milliseconds. `None` waits as long
    /// as the transport does.
    pub connect_timeout: Option<u64>,
}

impl Default for RelayClientOptions {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            connect_timeout: None,
        }
    }
}

/// Builder for RelayClient that validates the endpoint and wires up the
/// reconnection watcher.
pub struct RelayClientBuilder {
    endpoint: String,
    options: RelayClientOptions,
}

impl RelayClientBuilder {
    /// Create a new builder.
    ///
    /// The endpoint must be a parseable `ws://` or `wss://` URL; nothing is
    /// dialed here.
    pub fn new(endpoint: impl Into<String>, options: RelayClientOptions) -> Result<Self> {
        let endpoint = endpoint.into();

        let url = Url::parse(&endpoint)?;
        match url.scheme() {
            "ws" | "wss" => {}
            other => {
                return Err(RelayError::Config(format!(
                    "unsupported URL scheme '{}', expected ws or wss",
                    other
                )));
            }
        }

        Ok(Self { endpoint, options })
    }

    /// Build the client and spawn the reconnection watcher.
    pub fn build(self) -> RelayClient {
        let mut client_state = ClientState::new();

        // Link-change channel: (connected, was_manual_disconnect)
        let (link_tx, link_rx) = watch::channel((false, false));
        client_state.link_change_tx = Some(link_tx);

        let client = RelayClient {
            endpoint: self.endpoint,
            options: self.options,
            connection: Arc::new(ConnectionManager::new()),
            state: Arc::new(RwLock::new(client_state)),
        };

        // Reconnection watcher: runs the retry loop whenever the link drops
        // without a local disconnect() call.
        let watcher = client.clone();
        tokio::spawn(async move {
            let mut rx = link_rx;

            while rx.changed().await.is_ok() {
                let (connected, was_manual) = *rx.borrow_and_update();

                if !connected && !was_manual {
                    tracing::debug!("Link watcher detected drop, starting retry loop");
                    watcher.run_retry_loop().await;
                }
            }
            tracing::debug!("Link watcher finished");
        });

        client
    }
}
