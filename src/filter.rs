//! Pure filter evaluation over capture snapshots
//!
//! The filter never mutates the buffer: `apply` projects the visible subset
//! of a snapshot, in original insertion order. Matching is case-insensitive
//! substring containment on both the event type and the source; an empty
//! needle matches everything.

use crate::event::{CapturedEvent, EventRecord};

/// Type/source substring filter state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// Needle matched against the event type
    pub type_contains: String,
    /// Needle matched against the source
    pub source_contains: String,
}

impl EventFilter {
    /// Create a filter from both needles
    pub fn new(type_contains: impl Into<String>, source_contains: impl Into<String>) -> Self {
        Self {
            type_contains: type_contains.into(),
            source_contains: source_contains.into(),
        }
    }

    /// True when neither needle constrains the result
    pub fn is_identity(&self) -> bool {
        self.type_contains.is_empty() && self.source_contains.is_empty()
    }

    /// Check a single record against both needles
    pub fn matches(&self, record: &EventRecord) -> bool {
        contains_ignore_case(&record.event_type, &self.type_contains)
            && contains_ignore_case(&record.source, &self.source_contains)
    }

    /// Visible subset of `events`, in original order
    pub fn apply<'a>(&self, events: &'a [CapturedEvent]) -> Vec<&'a CapturedEvent> {
        events
            .iter()
            .filter(|event| self.matches(&event.record))
            .collect()
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Distinct event types present in `events`, in first-seen order.
///
/// Powers the type-filter autocomplete hints; not needed for correctness.
pub fn unique_types(events: &[CapturedEvent]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for event in events {
        if !seen.iter().any(|t| t == &event.record.event_type) {
            seen.push(event.record.event_type.clone());
        }
    }
    seen
}

/// Distinct sources present in `events`, in first-seen order
pub fn unique_sources(events: &[CapturedEvent]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for event in events {
        if !seen.iter().any(|s| s == &event.record.source) {
            seen.push(event.record.source.clone());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn captured(id: u64, event_type: &str, source: &str) -> CapturedEvent {
        CapturedEvent {
            id,
            record: EventRecord::new(event_type, source, json!({})),
        }
    }

    fn sample() -> Vec<CapturedEvent> {
        vec![
            captured(1, "panel:toggle", "sidebar"),
            captured(2, "file:opened", "editor"),
            captured(3, "file:error", "watcher"),
            captured(4, "file:opened", "editor"),
        ]
    }

    #[test]
    fn test_identity_filter_returns_everything_in_order() {
        let events = sample();
        let filter = EventFilter::default();
        assert!(filter.is_identity());

        let visible = filter.apply(&events);
        assert_eq!(visible.len(), events.len());
        let ids: Vec<_> = visible.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_type_matching_is_case_insensitive() {
        let events = sample();
        let filter = EventFilter::new("ERR", "");

        let visible = filter.apply(&events);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].record.event_type, "file:error");
    }

    #[test]
    fn test_needles_combine_with_and() {
        let events = sample();

        let filter = EventFilter::new("file", "editor");
        let ids: Vec<_> = filter.apply(&events).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 4]);

        // Source needle matching nothing empties the result
        let filter = EventFilter::new("file", "terminal");
        assert!(filter.apply(&events).is_empty());
    }

    #[test]
    fn test_apply_is_pure() {
        let events = sample();
        let filter = EventFilter::new("panel", "");

        let first = filter.apply(&events);
        let second = filter.apply(&events);
        assert_eq!(first.len(), second.len());
        assert_eq!(events.len(), 4);
    }

    #[test]
    fn test_unique_types_first_seen_order() {
        let events = sample();
        assert_eq!(
            unique_types(&events),
            vec!["panel:toggle", "file:opened", "file:error"]
        );
    }

    #[test]
    fn test_unique_sources_first_seen_order() {
        let events = sample();
        assert_eq!(unique_sources(&events), vec!["sidebar", "editor", "watcher"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(unique_types(&[]).is_empty());
        assert!(unique_sources(&[]).is_empty());
        assert!(EventFilter::new("x", "").apply(&[]).is_empty());
    }
}
