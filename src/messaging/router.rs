use crate::client::ClientState;
use crate::messaging::SocketEvent;
use crate::types::message::RelayMessage;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Routes incoming messages to registered listeners
pub struct MessageRouter {
    state: Arc<RwLock<ClientState>>,
}

impl MessageRouter {
    pub fn new_with_state(state: Arc<RwLock<ClientState>>) -> Self {
        Self { state }
    }

    /// Routes a message to the listeners bound to its event.
    ///
    /// Lifecycle names are reserved: they are only ever produced by the local
    /// transport machinery, so a peer sending one is ignored.
    pub async fn route(&self, message: RelayMessage) {
        match &message.event {
            SocketEvent::System(event) => {
                tracing::warn!(
                    "Ignoring reserved lifecycle event '{}' received from peer",
                    event.as_str()
                );
            }
            SocketEvent::Custom(name) => {
                tracing::debug!(
                    "Routing event '{}' with payload {}",
                    name,
                    serde_json::to_string(&message.payload).unwrap_or_default()
                );

                // Snapshot callbacks so listeners run without holding the state lock.
                let callbacks = {
                    let state = self.state.read().await;
                    state.listeners.callbacks_for(&message.event)
                };

                for callback in callbacks {
                    callback(message.payload.clone());
                }
            }
        }
    }
}
