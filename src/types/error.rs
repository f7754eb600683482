use thiserror::Error;

/// Errors that can occur when constructing or driving a relay client.
///
/// Only construction reports errors to the caller; transport failures at
/// runtime surface as lifecycle events instead.
#[derive(Error, Debug)]
pub enum RelayError {
    /// WebSocket protocol error (handshake failed, invalid frame, etc.)
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// URL parsing error (malformed endpoint)
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Rejected configuration (unsupported scheme, bad option value)
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The connect handshake did not finish within the configured timeout
    #[error("Connect timed out after {0} ms")]
    ConnectTimeout(u64),
}

/// Convenience type alias for `Result<T, RelayError>`.
pub type Result<T> = std::result::Result<T, RelayError>;
