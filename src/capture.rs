//! Bounded capture buffer for the event monitor
//!
//! Retains the most recent `max_events` records in arrival order, tagging
//! each with a monotonically increasing capture id. On overflow the oldest
//! records are evicted, never the newest. Pausing suppresses appends
//! entirely (events are dropped, not queued); clearing empties the window
//! without resetting the id counter, so ordering stays comparable across
//! clears.

use std::collections::VecDeque;

use tracing::warn;

use crate::event::{CapturedEvent, EventRecord};

/// Default retention window
pub const DEFAULT_MAX_EVENTS: usize = 200;

/// Bounded, insertion-ordered window over a stream of events
#[derive(Debug)]
pub struct CaptureBuffer {
    events: VecDeque<CapturedEvent>,
    max_events: usize,
    next_id: u64,
    paused: bool,
}

impl CaptureBuffer {
    /// Create an empty buffer retaining at most `max_events` records.
    ///
    /// A capacity of zero is clamped to one.
    pub fn new(max_events: usize) -> Self {
        let max_events = if max_events == 0 {
            warn!("capture buffer capacity 0 clamped to 1");
            1
        } else {
            max_events
        };
        Self {
            events: VecDeque::with_capacity(max_events.min(1024)),
            max_events,
            next_id: 1,
            paused: false,
        }
    }

    /// Append a record and return its assigned id, or `None` while paused.
    ///
    /// Ids start at 1 and increase by one per accepted record. When the
    /// buffer is at capacity the oldest record is evicted to make room.
    pub fn append(&mut self, record: EventRecord) -> Option<u64> {
        if self.paused {
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.events.push_back(CapturedEvent { id, record });
        while self.events.len() > self.max_events {
            self.events.pop_front();
        }
        Some(id)
    }

    /// Drop every retained record. Ids keep increasing across clears.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Suppress or re-enable appends. The subscription delivering records is
    /// unaffected; suppressed records are lost.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Whether appends are currently suppressed
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Immutable copy of the current contents, oldest first
    pub fn snapshot(&self) -> Vec<CapturedEvent> {
        self.events.iter().cloned().collect()
    }

    /// Iterate the retained records, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &CapturedEvent> {
        self.events.iter()
    }

    /// Number of retained records
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the window is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Configured retention window
    pub fn max_events(&self) -> usize {
        self.max_events
    }

    /// Highest id assigned so far (zero before the first accepted append)
    pub fn last_id(&self) -> u64 {
        self.next_id - 1
    }
}

impl Default for CaptureBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_EVENTS)
    }
}
