//! # socket-relay
//!
//! A realtime socket client with typed lifecycle events and automatic
//! reconnection.
//!
//! The client owns a WebSocket transport, tracks a single
//! connected/disconnected flag, and relays connection lifecycle events
//! (`connect`, `disconnect`, `connect_error`, `reconnect_attempt`,
//! `reconnect_failed`) to the log and to any listeners registered for them.
//! Application events are plain `{event, payload}` JSON envelopes in both
//! directions. Dropped links are re-dialed on a fixed-delay schedule
//! (unbounded attempts every two seconds by default) until `disconnect()` is
//! called.
//!
//! ## Example
//!
//! ```no_run
//! use socket_relay::{RelayClient, RelayClientOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RelayClient::new(
//!         "wss://example.test/socket",
//!         RelayClientOptions::default(),
//!     )?;
//!
//!     client.on("message", |payload| println!("message: {payload}")).await;
//!
//!     client.connect().await;
//!     client.emit("message", serde_json::json!({ "body": "hello" })).await;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod infrastructure;
pub mod messaging;
pub mod retry;
pub mod types;
pub mod websocket;

pub use client::{RelayClient, RelayClientBuilder, RelayClientOptions};
pub use messaging::{ListenerId, SocketEvent, SystemEvent};
pub use retry::{RetryLimit, RetryPolicy};
pub use types::{RelayError, RelayMessage};
