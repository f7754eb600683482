use crate::types::{error::Result, message::RelayMessage};
use crate::websocket::WsStream;
use futures::stream::SplitSink;
use futures::SinkExt;
use tokio::sync::RwLock;
use tokio_tungstenite::tungstenite::Message;

/// Write half of a connected WebSocket stream.
pub type WsSink = SplitSink<WsStream, Message>;

/// Owns the transport write half and the `connected` flag.
///
/// The flag is mutated only by the lifecycle relay: it flips to true on the
/// `connect` event and to false on the `disconnect` event, never anywhere
/// else.
pub struct ConnectionManager {
    ws_write: RwLock<Option<WsSink>>,
    connected: RwLock<bool>,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self {
            ws_write: RwLock::new(None),
            connected: RwLock::new(false),
        }
    }

    /// Install the write half after a successful handshake.
    pub async fn set_writer(&self, writer: WsSink) {
        let mut ws = self.ws_write.write().await;
        *ws = Some(writer);
    }

    /// Drop the write half without a close handshake (used when the read side
    /// observed the connection die).
    pub async fn clear_writer(&self) {
        let mut ws = self.ws_write.write().await;
        *ws = None;
    }

    pub async fn is_connected(&self) -> bool {
        *self.connected.read().await
    }

    pub async fn set_connected(&self, connected: bool) {
        let mut flag = self.connected.write().await;
        *flag = connected;
    }

    /// Serialize and send a message through the write half.
    ///
    /// Returns `Ok(false)` when no writer is installed: payloads sent while
    /// disconnected are dropped, matching the transport's best-effort
    /// contract.
    pub async fn send(&self, message: RelayMessage) -> Result<bool> {
        let json = serde_json::to_string(&message)?;

        let mut ws_guard = self.ws_write.write().await;
        match ws_guard.as_mut() {
            Some(ws) => {
                ws.send(Message::Text(json.into())).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Run the close handshake (if a writer is installed) and drop the writer.
    pub async fn close(&self) -> Result<()> {
        let mut ws_guard = self.ws_write.write().await;
        if let Some(ws) = ws_guard.as_mut() {
            ws.close().await?;
        }
        *ws_guard = None;

        Ok(())
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messaging::SocketEvent;

    #[tokio::test]
    async fn test_flag_starts_false_and_follows_setters() {
        let connection = ConnectionManager::new();

        assert!(!connection.is_connected().await);
        connection.set_connected(true).await;
        assert!(connection.is_connected().await);
        connection.set_connected(false).await;
        assert!(!connection.is_connected().await);
    }

    #[tokio::test]
    async fn test_send_without_writer_drops_the_message() {
        let connection = ConnectionManager::new();
        let message = RelayMessage::new(
            SocketEvent::Custom("tick".to_string()),
            serde_json::Value::Null,
        );

        let written = connection.send(message).await.unwrap();
        assert!(!written);
    }

    #[tokio::test]
    async fn test_close_without_writer_is_a_no_op() {
        let connection = ConnectionManager::new();

        connection.close().await.unwrap();
        assert!(!connection.is_connected().await);
    }
}
