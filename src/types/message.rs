use serde::{Deserialize, Serialize};

use crate::messaging::SocketEvent;

/// Wire envelope for everything crossing the socket: an event name plus an
/// arbitrary JSON payload. A missing payload deserializes to `null`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelayMessage {
    pub event: SocketEvent,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl RelayMessage {
    pub fn new(event: SocketEvent, payload: serde_json::Value) -> Self {
        Self { event, payload }
    }
}
