use crate::types::error::Result;
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

/// Connected WebSocket stream over plain TCP or TLS.
pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// WebSocket factory for creating WebSocket connections
pub struct WebSocketFactory;

impl WebSocketFactory {
    /// Dial the endpoint and complete the WebSocket handshake.
    pub async fn create(url: &str) -> Result<WsStream> {
        tracing::debug!("Opening WebSocket connection to {}", url);
        let (stream, _response) = connect_async(url).await?;
        Ok(stream)
    }
}
