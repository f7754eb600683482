use super::SocketEvent;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

/// Shared callback invoked with an event's payload.
pub type EventCallback = Arc<dyn Fn(Value) + Send + Sync>;

/// Opaque handle identifying one registration, returned by `bind` and
/// consumed by `unbind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(Uuid);

struct EventBinding {
    event: SocketEvent,
    id: ListenerId,
    callback: EventCallback,
}

/// Ordered event-to-callback bindings.
///
/// Bindings for the same event accumulate; `callbacks_for` returns them in
/// registration order so fan-out can happen outside any lock.
#[derive(Default)]
pub struct ListenerRegistry {
    bindings: Vec<EventBinding>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Register a callback for an event, returning its handle.
    pub fn bind<F>(&mut self, event: SocketEvent, callback: F) -> ListenerId
    where
        F: Fn(Value) + Send + Sync + 'static,
    {
        let id = ListenerId(Uuid::new_v4());
        self.bindings.push(EventBinding {
            event,
            id,
            callback: Arc::new(callback),
        });
        id
    }

    /// Remove one registration. Returns whether a binding was removed.
    pub fn unbind(&mut self, event: &SocketEvent, id: ListenerId) -> bool {
        let before = self.bindings.len();
        self.bindings
            .retain(|binding| !(binding.id == id && binding.event == *event));
        self.bindings.len() != before
    }

    /// Remove every registration for an event. Returns how many were removed.
    pub fn unbind_all(&mut self, event: &SocketEvent) -> usize {
        let before = self.bindings.len();
        self.bindings.retain(|binding| binding.event != *event);
        before - self.bindings.len()
    }

    /// Snapshot the callbacks bound to an event, in registration order.
    pub fn callbacks_for(&self, event: &SocketEvent) -> Vec<EventCallback> {
        self.bindings
            .iter()
            .filter(|binding| binding.event == *event)
            .map(|binding| Arc::clone(&binding.callback))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    fn event(name: &str) -> SocketEvent {
        SocketEvent::Custom(name.to_string())
    }

    #[test]
    fn test_bind_and_invoke_with_payload() {
        let mut registry = ListenerRegistry::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let seen_cb = Arc::clone(&seen);
        registry.bind(event("orders"), move |payload| {
            seen_cb.lock().unwrap().push(payload);
        });

        for callback in registry.callbacks_for(&event("orders")) {
            callback(json!({ "id": 1 }));
        }

        assert_eq!(*seen.lock().unwrap(), vec![json!({ "id": 1 })]);
    }

    #[test]
    fn test_multiple_bindings_fire_in_registration_order() {
        let mut registry = ListenerRegistry::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let order_cb = Arc::clone(&order);
            registry.bind(event("tick"), move |_| {
                order_cb.lock().unwrap().push(tag);
            });
        }

        for callback in registry.callbacks_for(&event("tick")) {
            callback(Value::Null);
        }

        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_unbind_removes_only_that_listener() {
        let mut registry = ListenerRegistry::new();

        let first = registry.bind(event("tick"), |_| {});
        let _second = registry.bind(event("tick"), |_| {});

        assert!(registry.unbind(&event("tick"), first));
        assert_eq!(registry.callbacks_for(&event("tick")).len(), 1);

        // Removing the same binding again is a no-op.
        assert!(!registry.unbind(&event("tick"), first));
    }

    #[test]
    fn test_unbind_requires_matching_event() {
        let mut registry = ListenerRegistry::new();
        let id = registry.bind(event("tick"), |_| {});

        assert!(!registry.unbind(&event("other"), id));
        assert_eq!(registry.callbacks_for(&event("tick")).len(), 1);
    }

    #[test]
    fn test_unbind_all_clears_one_event_only() {
        let mut registry = ListenerRegistry::new();

        registry.bind(event("tick"), |_| {});
        registry.bind(event("tick"), |_| {});
        registry.bind(event("orders"), |_| {});

        assert_eq!(registry.unbind_all(&event("tick")), 2);
        assert!(registry.callbacks_for(&event("tick")).is_empty());
        assert_eq!(registry.callbacks_for(&event("orders")).len(), 1);
    }

    #[test]
    fn test_listener_ids_are_unique() {
        let mut registry = ListenerRegistry::new();
        let a = registry.bind(event("tick"), |_| {});
        let b = registry.bind(event("tick"), |_| {});

        assert_ne!(a, b);
    }
}
