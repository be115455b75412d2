//! Synchronous publish/subscribe hub keyed on [`EventKind`].
//!
//! Handlers run on the caller's thread, in subscription order, before
//! `publish` returns. A handler may publish again; the nested publish is fully
//! dispatched before the next sibling handler runs (depth-first). Each publish
//! works on a snapshot of the handler list, so subscribing or unsubscribing
//! from inside a handler only affects later publishes.
//!
//! The bus is a cheap handle: clones share the same registry.

#[cfg(test)]
#[path = "bus_test.rs"]
mod bus_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::event::{DiagramEvent, EventKind};

/// Boxed event handler.
pub type Handler = Rc<dyn Fn(&DiagramEvent)>;

/// Token returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: HashMap<EventKind, Vec<(SubscriptionId, Handler)>>,
}

#[derive(Clone, Default)]
pub struct EventBus {
    registry: Rc<RefCell<Registry>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.registry.borrow();
        let total: usize = registry.handlers.values().map(Vec::len).sum();
        f.debug_struct("EventBus").field("subscribers", &total).finish()
    }
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for every event of `kind`.
    pub fn subscribe<F>(&self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: Fn(&DiagramEvent) + 'static,
    {
        let mut registry = self.registry.borrow_mut();
        let id = SubscriptionId(registry.next_id);
        registry.next_id += 1;
        registry.handlers.entry(kind).or_default().push((id, Rc::new(handler)));
        id
    }

    /// Remove a handler. Returns `false` if the id was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut registry = self.registry.borrow_mut();
        for handlers in registry.handlers.values_mut() {
            if let Some(index) = handlers.iter().position(|(sid, _)| *sid == id) {
                handlers.remove(index);
                return true;
            }
        }
        false
    }

    /// Number of handlers currently registered for `kind`.
    #[must_use]
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.registry.borrow().handlers.get(&kind).map_or(0, Vec::len)
    }

    /// Dispatch `event` to every handler registered for its kind.
    ///
    /// Publishing with no subscribers is a no-op.
    pub fn publish(&self, event: DiagramEvent) {
        let kind = event.kind();
        // Release the registry before running handlers; they may re-enter.
        let handlers: Vec<Handler> = self
            .registry
            .borrow()
            .handlers
            .get(&kind)
            .map(|list| list.iter().map(|(_, h)| Rc::clone(h)).collect())
            .unwrap_or_default();

        tracing::trace!(?kind, subscribers = handlers.len(), "publish");
        for handler in handlers {
            handler(&event);
        }
    }
}
