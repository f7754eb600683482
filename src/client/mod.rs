// Module declarations
mod builder;
mod connection;
mod core;
mod state;

// Public API exports
pub use self::builder::{RelayClientBuilder, RelayClientOptions};
pub use self::connection::ConnectionManager;
pub use self::core::RelayClient;
pub use self::state::ClientState;
