use crate::infrastructure::TaskManager;
use crate::messaging::ListenerRegistry;
use tokio::sync::watch;

/// Consolidated mutable state for RelayClient
/// Using a single struct reduces lock contention
pub struct ClientState {
    /// Event listeners registered through `on`
    pub listeners: ListenerRegistry,

    /// Background task tracker (read task)
    pub tasks: TaskManager,

    /// Whether the last disconnect was requested locally (suppresses the
    /// retry loop)
    pub was_manual_disconnect: bool,

    /// Sender side of the link-change channel the reconnection watcher
    /// listens on; the tuple is `(connected, was_manual_disconnect)`
    pub link_change_tx: Option<watch::Sender<(bool, bool)>>,
}

impl ClientState {
    pub fn new() -> Self {
        Self {
            listeners: ListenerRegistry::new(),
            tasks: TaskManager::new(),
            was_manual_disconnect: false,
            link_change_tx: None,
        }
    }

    /// Notify the link watcher of a connectivity transition.
    pub fn notify_link_change(&self, connected: bool, manual: bool) {
        if let Some(tx) = &self.link_change_tx {
            if tx.send((connected, manual)).is_err() {
                tracing::debug!(
                    "Link watcher gone, dropping notification (connected={})",
                    connected
                );
            }
        }
    }
}

impl Default for ClientState {
    fn default() -> Self {
        Self::new()
    }
}
