use crate::types::constants::lifecycle_events;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Type-safe event names.
///
/// Lifecycle events are produced by the client's own transport machinery;
/// everything else is an application-defined event carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SocketEvent {
    /// Connection lifecycle events
    System(SystemEvent),

    /// Custom application-defined event
    Custom(String),
}

impl SocketEvent {
    /// Parse a string into a SocketEvent
    pub fn from_str(s: &str) -> Self {
        match SystemEvent::try_from_str(s) {
            Some(event) => Self::System(event),
            None => Self::Custom(s.to_string()),
        }
    }

    /// Convert event to its wire string representation
    pub fn as_str(&self) -> &str {
        match self {
            Self::System(sys) => sys.as_str(),
            Self::Custom(s) => s,
        }
    }
}

impl From<&str> for SocketEvent {
    fn from(s: &str) -> Self {
        Self::from_str(s)
    }
}

impl From<String> for SocketEvent {
    fn from(s: String) -> Self {
        Self::from_str(&s)
    }
}

impl From<SystemEvent> for SocketEvent {
    fn from(event: SystemEvent) -> Self {
        Self::System(event)
    }
}

impl std::fmt::Display for SocketEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Events travel as bare strings on the wire.
impl Serialize for SocketEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SocketEvent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_str(&s))
    }
}

/// Connection lifecycle events relayed to the diagnostic log and to any
/// listeners registered for them.
///
/// Payloads delivered to listeners:
/// - `Connect` / `ReconnectFailed`: `null`
/// - `Disconnect`: the reason string
/// - `ConnectError`: the error message string
/// - `ReconnectAttempt`: the 1-based attempt number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemEvent {
    Connect,
    Disconnect,
    ConnectError,
    ReconnectAttempt,
    ReconnectFailed,
}

impl SystemEvent {
    pub fn try_from_str(s: &str) -> Option<Self> {
        match s {
            lifecycle_events::CONNECT => Some(Self::Connect),
            lifecycle_events::DISCONNECT => Some(Self::Disconnect),
            lifecycle_events::CONNECT_ERROR => Some(Self::ConnectError),
            lifecycle_events::RECONNECT_ATTEMPT => Some(Self::ReconnectAttempt),
            lifecycle_events::RECONNECT_FAILED => Some(Self::ReconnectFailed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connect => lifecycle_events::CONNECT,
            Self::Disconnect => lifecycle_events::DISCONNECT,
            Self::ConnectError => lifecycle_events::CONNECT_ERROR,
            Self::ReconnectAttempt => lifecycle_events::RECONNECT_ATTEMPT,
            Self::ReconnectFailed => lifecycle_events::RECONNECT_FAILED,
        }
    }
}
