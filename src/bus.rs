//! Host event source interface and an in-memory reference bus
//!
//! The host application's bus is an external collaborator: the panels only
//! require the capability surface modeled by [`EventSource`]. Type-scoped
//! subscription is the required base method; wildcard delivery is a
//! separately queryable optional capability, tested at runtime before use.
//! A source without it simply yields no captured events.
//!
//! [`EventBus`] is a reference implementation used by the demo binary and
//! the integration tests. Dispatch is synchronous and in-order on the
//! calling thread: no reordering, no batching.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::event::EventRecord;

/// Handler invoked synchronously for each dispatched event
pub type EventHandler = Box<dyn FnMut(&EventRecord) + Send>;

/// Deregisters a handler when invoked.
///
/// Safe to call more than once. Dropping the handle without calling
/// [`unsubscribe`](Self::unsubscribe) leaves the handler registered; owners
/// that must not leak capture past teardown (like
/// [`EventMonitor`](crate::monitor::EventMonitor)) unsubscribe on drop.
pub struct SubscriptionHandle {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl SubscriptionHandle {
    /// Wrap an unsubscribe closure
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Deregister the handler. Idempotent.
    pub fn unsubscribe(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    /// Whether the handler is still registered through this handle
    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }
}

impl std::fmt::Debug for SubscriptionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionHandle")
            .field("active", &self.is_active())
            .finish()
    }
}

/// Capability surface the panels require from the host
pub trait EventSource {
    /// Register a handler for a single event type
    fn subscribe(&self, event_type: &str, handler: EventHandler) -> SubscriptionHandle;

    /// Register a handler receiving every event regardless of type.
    ///
    /// Optional capability: sources without wildcard dispatch return `None`
    /// and callers degrade to an empty stream.
    fn subscribe_all(&self, handler: EventHandler) -> Option<SubscriptionHandle> {
        let _ = handler;
        None
    }
}

#[derive(Default)]
struct Registry {
    next_token: u64,
    typed: HashMap<String, Vec<(u64, EventHandler)>>,
    wildcard: Vec<(u64, EventHandler)>,
}

impl Registry {
    fn next_token(&mut self) -> u64 {
        let token = self.next_token;
        self.next_token += 1;
        token
    }
}

/// Synchronous in-memory event bus.
///
/// Events are dispatched on the emitting thread, in registration order:
/// type-scoped handlers first, then wildcard handlers. Handlers must not
/// call back into the bus; dispatch holds the registry lock.
#[derive(Clone)]
pub struct EventBus {
    registry: Arc<Mutex<Registry>>,
    wildcard_capable: bool,
}

impl EventBus {
    /// Create a bus with wildcard dispatch available
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry::default())),
            wildcard_capable: true,
        }
    }

    /// Create a bus whose wildcard capability is absent, mimicking hosts
    /// that only support type-scoped delivery
    pub fn without_wildcard() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry::default())),
            wildcard_capable: false,
        }
    }

    /// Dispatch `record` to matching handlers
    pub fn emit(&self, record: &EventRecord) {
        let mut registry = self.lock_registry();
        if let Some(handlers) = registry.typed.get_mut(&record.event_type) {
            for (_, handler) in handlers.iter_mut() {
                handler(record);
            }
        }
        for (_, handler) in registry.wildcard.iter_mut() {
            handler(record);
        }
    }

    /// Number of wildcard handlers currently registered
    pub fn wildcard_subscriber_count(&self) -> usize {
        self.lock_registry().wildcard.len()
    }

    /// Number of handlers registered for `event_type`
    pub fn typed_subscriber_count(&self, event_type: &str) -> usize {
        self.lock_registry()
            .typed
            .get(event_type)
            .map(Vec::len)
            .unwrap_or(0)
    }

    // A poisoned lock means a handler panicked mid-dispatch; the registry
    // itself is still structurally sound, so keep serving it.
    fn lock_registry(&self) -> std::sync::MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for EventBus {
    fn subscribe(&self, event_type: &str, handler: EventHandler) -> SubscriptionHandle {
        let token = {
            let mut registry = self.lock_registry();
            let token = registry.next_token();
            registry
                .typed
                .entry(event_type.to_string())
                .or_default()
                .push((token, handler));
            token
        };

        let registry = Arc::clone(&self.registry);
        let event_type = event_type.to_string();
        SubscriptionHandle::new(move || {
            if let Ok(mut registry) = registry.lock() {
                if let Some(handlers) = registry.typed.get_mut(&event_type) {
                    handlers.retain(|(t, _)| *t != token);
                }
            }
        })
    }

    fn subscribe_all(&self, handler: EventHandler) -> Option<SubscriptionHandle> {
        if !self.wildcard_capable {
            debug!("wildcard subscription requested on a source without the capability");
            return None;
        }

        let token = {
            let mut registry = self.lock_registry();
            let token = registry.next_token();
            registry.wildcard.push((token, handler));
            token
        };

        let registry = Arc::clone(&self.registry);
        Some(SubscriptionHandle::new(move || {
            if let Ok(mut registry) = registry.lock() {
                registry.wildcard.retain(|(t, _)| *t != token);
            }
        }))
    }
}
