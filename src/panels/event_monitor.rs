//! Event monitor panel - wildcard event stream with bounded capture
//!
//! Features:
//! - Bounded rolling capture window (oldest evicted first)
//! - Pause/resume capture without dropping the subscription
//! - Case-insensitive type/source substring filters, edited inline with
//!   autocomplete hints drawn from the captured stream
//! - Per-event payload expansion
//! - Relative timestamps and namespace color coding

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use crate::bus::EventSource;
use crate::colors::PanelColors;
use crate::config::MonitorConfig;
use crate::event::CapturedEvent;
use crate::filter::{unique_sources, unique_types, EventFilter};
use crate::monitor::EventMonitor;

/// Which filter needle is being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterField {
    Type,
    Source,
}

/// Event monitor panel widget
pub struct EventMonitorPanel {
    monitor: EventMonitor,
    filter: EventFilter,
    /// Capture ids with payload detail expanded
    expanded: HashSet<u64>,
    /// Cursor row, measured back from the newest visible event
    cursor: usize,
    editing: Option<FilterField>,
    title: String,
}

impl EventMonitorPanel {
    /// Create a panel attached to `source`
    pub fn new(source: &dyn EventSource, config: MonitorConfig) -> Self {
        Self {
            monitor: EventMonitor::attach(source, config),
            filter: EventFilter::default(),
            expanded: HashSet::new(),
            cursor: 0,
            editing: None,
            title: "Event Monitor".to_string(),
        }
    }

    /// Set custom title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Underlying capture session
    pub fn monitor(&self) -> &EventMonitor {
        &self.monitor
    }

    /// Release the wildcard subscription
    pub fn detach(&mut self) {
        self.monitor.detach();
    }

    /// Current filter state
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }

    /// Replace the filter state
    pub fn set_filter(&mut self, filter: EventFilter) {
        self.filter = filter;
        self.cursor = 0;
    }

    /// Whether a filter needle is being edited
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Handle a key press. Returns true when the key was consumed.
    ///
    /// While a filter needle is being edited every key is consumed: printable
    /// characters extend the needle, Backspace shortens it, Tab completes to
    /// the first autocomplete hint, Enter/Esc leave edit mode.
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        if let Some(field) = self.editing {
            match key {
                KeyCode::Esc | KeyCode::Enter => self.editing = None,
                KeyCode::Backspace => {
                    self.needle_mut(field).pop();
                }
                KeyCode::Tab => {
                    if let Some(hint) = self.hints(field).into_iter().next() {
                        *self.needle_mut(field) = hint;
                    }
                }
                KeyCode::Char(c) => self.needle_mut(field).push(c),
                _ => {}
            }
            self.cursor = 0;
            return true;
        }

        match key {
            KeyCode::Char('p') => {
                let paused = self.monitor.is_paused();
                self.monitor.set_paused(!paused);
            }
            KeyCode::Char('c') => {
                self.monitor.clear();
                self.expanded.clear();
                self.cursor = 0;
            }
            KeyCode::Char('/') => self.editing = Some(FilterField::Type),
            KeyCode::Char('s') => self.editing = Some(FilterField::Source),
            KeyCode::Char('x') => {
                self.filter = EventFilter::default();
                self.cursor = 0;
            }
            KeyCode::Up => {
                let count = self.visible_count();
                if count > 0 {
                    self.cursor = (self.cursor + 1).min(count - 1);
                }
            }
            KeyCode::Down => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Enter => {
                if let Some(id) = self.cursor_id() {
                    if !self.expanded.insert(id) {
                        self.expanded.remove(&id);
                    }
                }
            }
            _ => return false,
        }
        true
    }

    /// Number of events passing the active filter
    pub fn visible_count(&self) -> usize {
        let snapshot = self.monitor.snapshot();
        self.filter.apply(&snapshot).len()
    }

    /// Capture id under the cursor
    fn cursor_id(&self) -> Option<u64> {
        let snapshot = self.monitor.snapshot();
        let visible = self.filter.apply(&snapshot);
        visible.iter().rev().nth(self.cursor).map(|event| event.id)
    }

    fn needle_mut(&mut self, field: FilterField) -> &mut String {
        match field {
            FilterField::Type => &mut self.filter.type_contains,
            FilterField::Source => &mut self.filter.source_contains,
        }
    }

    /// Autocomplete candidates for the edited needle, drawn from the
    /// captured stream in first-seen order
    fn hints(&self, field: FilterField) -> Vec<String> {
        let snapshot = self.monitor.snapshot();
        let (candidates, needle) = match field {
            FilterField::Type => (unique_types(&snapshot), &self.filter.type_contains),
            FilterField::Source => (unique_sources(&snapshot), &self.filter.source_contains),
        };
        let needle = needle.to_lowercase();
        candidates
            .into_iter()
            .filter(|candidate| candidate.to_lowercase().contains(&needle))
            .take(3)
            .collect()
    }

    /// Render the event monitor panel
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let snapshot = self.monitor.snapshot();
        let visible = self.filter.apply(&snapshot);
        let available_height = area.height.saturating_sub(2) as usize;

        let items: Vec<ListItem> = if visible.is_empty() {
            let placeholder = if !self.monitor.is_subscribed() {
                "Event stream unavailable"
            } else if snapshot.is_empty() {
                "Waiting for events..."
            } else {
                "No events match the active filters"
            };
            vec![ListItem::new(Line::from(Span::styled(
                placeholder,
                Style::default()
                    .fg(PanelColors::MUTED)
                    .add_modifier(Modifier::ITALIC),
            )))]
        } else {
            let cursor = self.cursor.min(visible.len() - 1);
            visible
                .iter()
                .rev()
                .skip(cursor)
                .take(available_height)
                .enumerate()
                .map(|(row, event)| self.render_event(event, row == 0))
                .collect()
        };

        let mut title = format!("{} ({}/{})", self.title, visible.len(), snapshot.len());
        if self.monitor.is_paused() {
            title.push_str(" [PAUSED]");
        }
        if !self.monitor.is_subscribed() {
            title.push_str(" [NO STREAM]");
        }

        let border_color = if self.monitor.is_paused() {
            PanelColors::WARNING
        } else {
            PanelColors::BORDER
        };
        let mut block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(border_color));
        if self.editing.is_some() || !self.filter.is_identity() {
            block = block.title_bottom(self.filter_status_line());
        }

        frame.render_widget(List::new(items).block(block), area);
    }

    /// Render a single captured event (newest rows at the top)
    fn render_event(&self, event: &CapturedEvent, is_cursor: bool) -> ListItem<'static> {
        let record = &event.record;
        let namespace = record.namespace();
        let type_color = if record.event_type.contains("error") || record.event_type.contains("failed")
        {
            PanelColors::ERROR
        } else {
            PanelColors::namespace_color(namespace)
        };

        let marker = if is_cursor { "▶" } else { " " };
        let expanded = self.expanded.contains(&event.id);
        let detail_marker = if expanded { "▾" } else { "▸" };

        let mut lines = vec![Line::from(vec![
            Span::styled(
                format!("{marker} "),
                Style::default().fg(PanelColors::HEADER),
            ),
            Span::styled(
                format!("{:>4} ", format_relative_time(record.timestamp)),
                Style::default().fg(PanelColors::SECONDARY),
            ),
            Span::styled(
                format!("{detail_marker} "),
                Style::default().fg(PanelColors::SECONDARY),
            ),
            Span::styled(
                format!("[{}] ", namespace.to_uppercase()),
                Style::default().fg(type_color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                record.event_type.clone(),
                Style::default().fg(PanelColors::TEXT),
            ),
            Span::styled(
                format!("  {}", record.source),
                Style::default().fg(PanelColors::SECONDARY),
            ),
        ])];

        if expanded {
            let payload =
                serde_json::to_string(&record.payload).unwrap_or_else(|_| "null".to_string());
            lines.push(Line::from(vec![
                Span::raw("        "),
                Span::styled(
                    truncate(&payload, 96),
                    Style::default().fg(PanelColors::SECONDARY),
                ),
            ]));
        }

        ListItem::new(lines)
    }

    /// Status line showing both needles and autocomplete hints
    fn filter_status_line(&self) -> Line<'static> {
        let field_style = |field: FilterField| {
            if self.editing == Some(field) {
                Style::default()
                    .fg(PanelColors::WARNING)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(PanelColors::SECONDARY)
            }
        };

        let mut spans = vec![
            Span::styled(
                format!(" type~\"{}\" ", self.filter.type_contains),
                field_style(FilterField::Type),
            ),
            Span::styled(
                format!("source~\"{}\" ", self.filter.source_contains),
                field_style(FilterField::Source),
            ),
        ];

        if let Some(field) = self.editing {
            let hints = self.hints(field);
            if !hints.is_empty() {
                spans.push(Span::styled(
                    format!("⇥ {} ", hints.join(", ")),
                    Style::default().fg(PanelColors::MUTED),
                ));
            }
        }

        Line::from(spans)
    }
}

/// Format timestamp as relative time
fn format_relative_time(timestamp: DateTime<Utc>) -> String {
    let age = Utc::now().signed_duration_since(timestamp);

    if age.num_seconds() < 1 {
        "now".to_string()
    } else if age.num_seconds() < 60 {
        format!("{}s", age.num_seconds())
    } else if age.num_minutes() < 60 {
        format!("{}m", age.num_minutes())
    } else if age.num_hours() < 24 {
        format!("{}h", age.num_hours())
    } else {
        format!("{}d", age.num_days())
    }
}

/// Truncate to at most `max_len` characters
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::EventBus;
    use crate::event::EventRecord;
    use ratatui::{backend::TestBackend, Terminal};
    use serde_json::json;

    fn emit(bus: &EventBus, event_type: &str, source: &str) {
        bus.emit(&EventRecord::new(event_type, source, json!({"k": 1})));
    }

    fn rendered_text(panel: &EventMonitorPanel) -> String {
        let backend = TestBackend::new(72, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| panel.render(frame, frame.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol().to_string())
            .collect()
    }

    #[test]
    fn test_empty_panel_shows_waiting_placeholder() {
        let bus = EventBus::new();
        let panel = EventMonitorPanel::new(&bus, MonitorConfig::default());
        assert!(rendered_text(&panel).contains("Waiting for events..."));
    }

    #[test]
    fn test_wildcardless_host_shows_unavailable_placeholder() {
        let bus = EventBus::without_wildcard();
        let panel = EventMonitorPanel::new(&bus, MonitorConfig::default());
        let text = rendered_text(&panel);
        assert!(text.contains("Event stream unavailable"));
        assert!(text.contains("[NO STREAM]"));
    }

    #[test]
    fn test_rows_render_type_and_source() {
        let bus = EventBus::new();
        let panel = EventMonitorPanel::new(&bus, MonitorConfig::default());
        emit(&bus, "panel:toggle", "sidebar");

        let text = rendered_text(&panel);
        assert!(text.contains("panel:toggle"));
        assert!(text.contains("sidebar"));
    }

    #[test]
    fn test_pause_key_toggles_capture() {
        let bus = EventBus::new();
        let mut panel = EventMonitorPanel::new(&bus, MonitorConfig::default());

        assert!(panel.handle_key(KeyCode::Char('p')));
        assert!(panel.monitor().is_paused());
        emit(&bus, "a:1", "x");
        assert_eq!(panel.monitor().len(), 0);

        panel.handle_key(KeyCode::Char('p'));
        emit(&bus, "a:2", "x");
        assert_eq!(panel.monitor().len(), 1);
    }

    #[test]
    fn test_clear_key_empties_window() {
        let bus = EventBus::new();
        let mut panel = EventMonitorPanel::new(&bus, MonitorConfig::default());
        emit(&bus, "a:1", "x");
        emit(&bus, "a:2", "x");

        panel.handle_key(KeyCode::Char('c'));
        assert_eq!(panel.visible_count(), 0);
    }

    #[test]
    fn test_filter_editing_consumes_keys() {
        let bus = EventBus::new();
        let mut panel = EventMonitorPanel::new(&bus, MonitorConfig::default());
        emit(&bus, "file:error", "watcher");
        emit(&bus, "panel:toggle", "sidebar");

        panel.handle_key(KeyCode::Char('/'));
        assert!(panel.is_editing());
        // 'q' is typed into the needle, not treated as a command
        for c in ['e', 'r', 'r'] {
            assert!(panel.handle_key(KeyCode::Char(c)));
        }
        panel.handle_key(KeyCode::Enter);

        assert!(!panel.is_editing());
        assert_eq!(panel.filter().type_contains, "err");
        assert_eq!(panel.visible_count(), 1);
    }

    #[test]
    fn test_tab_completes_from_stream_hints() {
        let bus = EventBus::new();
        let mut panel = EventMonitorPanel::new(&bus, MonitorConfig::default());
        emit(&bus, "file:opened", "editor");
        emit(&bus, "file:error", "watcher");

        panel.handle_key(KeyCode::Char('s'));
        panel.handle_key(KeyCode::Char('w'));
        panel.handle_key(KeyCode::Tab);
        panel.handle_key(KeyCode::Esc);

        assert_eq!(panel.filter().source_contains, "watcher");
    }

    #[test]
    fn test_reset_key_clears_both_needles() {
        let bus = EventBus::new();
        let mut panel = EventMonitorPanel::new(&bus, MonitorConfig::default());
        panel.set_filter(EventFilter::new("file", "editor"));

        panel.handle_key(KeyCode::Char('x'));
        assert!(panel.filter().is_identity());
    }

    #[test]
    fn test_cursor_moves_within_visible_bounds() {
        let bus = EventBus::new();
        let mut panel = EventMonitorPanel::new(&bus, MonitorConfig::default());
        emit(&bus, "a:1", "x");
        emit(&bus, "a:2", "x");

        panel.handle_key(KeyCode::Up);
        panel.handle_key(KeyCode::Up);
        panel.handle_key(KeyCode::Up);
        assert_eq!(panel.cursor, 1);

        panel.handle_key(KeyCode::Down);
        panel.handle_key(KeyCode::Down);
        assert_eq!(panel.cursor, 0);
    }

    #[test]
    fn test_enter_toggles_payload_expansion() {
        let bus = EventBus::new();
        let mut panel = EventMonitorPanel::new(&bus, MonitorConfig::default());
        emit(&bus, "a:1", "x");

        panel.handle_key(KeyCode::Enter);
        assert!(rendered_text(&panel).contains("{\"k\":1}"));

        panel.handle_key(KeyCode::Enter);
        assert!(!rendered_text(&panel).contains("{\"k\":1}"));
    }

    #[test]
    fn test_unhandled_keys_are_not_consumed() {
        let bus = EventBus::new();
        let mut panel = EventMonitorPanel::new(&bus, MonitorConfig::default());
        assert!(!panel.handle_key(KeyCode::Char('q')));
        assert!(!panel.handle_key(KeyCode::Char('1')));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long payload here", 10), "a very ...");
    }

    #[test]
    fn test_format_relative_time() {
        let now = Utc::now();
        assert_eq!(format_relative_time(now), "now");
        assert_eq!(
            format_relative_time(now - chrono::Duration::seconds(30)),
            "30s"
        );
        assert_eq!(
            format_relative_time(now - chrono::Duration::minutes(5)),
            "5m"
        );
        assert_eq!(format_relative_time(now - chrono::Duration::hours(3)), "3h");
    }
}
