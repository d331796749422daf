//! Subscription lifecycle glue between a host event source and the capture buffer
//!
//! An [`EventMonitor`] registers a wildcard handler feeding its buffer and
//! releases it on detach or drop. Pause and resume never touch the
//! subscription itself; they only toggle the buffer's accept/drop behavior.

use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::bus::{EventSource, SubscriptionHandle};
use crate::capture::CaptureBuffer;
use crate::config::MonitorConfig;
use crate::event::CapturedEvent;

/// Wildcard capture session over a host event source
pub struct EventMonitor {
    buffer: Arc<Mutex<CaptureBuffer>>,
    subscription: Option<SubscriptionHandle>,
}

impl EventMonitor {
    /// Attach to `source` with the given retention configuration.
    ///
    /// A source without wildcard dispatch yields a monitor that observes an
    /// empty stream; this is not an error.
    pub fn attach(source: &dyn EventSource, config: MonitorConfig) -> Self {
        let buffer = Arc::new(Mutex::new(CaptureBuffer::new(config.max_events)));
        let sink = Arc::clone(&buffer);
        let subscription = source.subscribe_all(Box::new(move |record| {
            if let Ok(mut buffer) = sink.lock() {
                buffer.append(record.clone());
            }
        }));

        match &subscription {
            Some(_) => debug!(max_events = config.max_events, "event monitor subscribed"),
            None => debug!("event source lacks wildcard dispatch; monitor stays empty"),
        }

        Self {
            buffer,
            subscription,
        }
    }

    /// Whether the wildcard handler is currently registered
    pub fn is_subscribed(&self) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(SubscriptionHandle::is_active)
    }

    /// Release the wildcard handler.
    ///
    /// Idempotent, and safe when the source never granted a subscription.
    pub fn detach(&mut self) {
        if let Some(subscription) = self.subscription.as_mut() {
            if subscription.is_active() {
                debug!("event monitor unsubscribed");
            }
            subscription.unsubscribe();
        }
    }

    /// Suppress capture; arriving events are dropped, not queued
    pub fn pause(&self) {
        self.set_paused(true);
    }

    /// Re-enable capture
    pub fn resume(&self) {
        self.set_paused(false);
    }

    /// Toggle capture suppression
    pub fn set_paused(&self, paused: bool) {
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.set_paused(paused);
        }
    }

    /// Whether capture is currently suppressed
    pub fn is_paused(&self) -> bool {
        self.buffer.lock().map(|b| b.is_paused()).unwrap_or(false)
    }

    /// Empty the capture window. Capture ids keep increasing across clears.
    pub fn clear(&self) {
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.clear();
        }
    }

    /// Immutable copy of the captured events, oldest first
    pub fn snapshot(&self) -> Vec<CapturedEvent> {
        self.buffer.lock().map(|b| b.snapshot()).unwrap_or_default()
    }

    /// Number of retained events
    pub fn len(&self) -> usize {
        self.buffer.lock().map(|b| b.len()).unwrap_or(0)
    }

    /// Whether the capture window is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Highest capture id assigned so far
    pub fn last_id(&self) -> u64 {
        self.buffer.lock().map(|b| b.last_id()).unwrap_or(0)
    }

    /// Configured retention window
    pub fn max_events(&self) -> usize {
        self.buffer
            .lock()
            .map(|b| b.max_events())
            .unwrap_or_default()
    }
}

impl Drop for EventMonitor {
    fn drop(&mut self) {
        self.detach();
    }
}
