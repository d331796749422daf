//! Agent capability viewer panel - static descriptor rendering
//!
//! Displays an agent manifest exactly as supplied: identity header,
//! capability badges, and the tool list with parameter summaries. Nothing
//! described here is executed or validated; absent data renders as
//! placeholder text.

use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use serde_json::Value;

use crate::colors::PanelColors;
use crate::manifest::AgentManifest;
use crate::widgets::{StateIndicator, StateType};

/// Agent capability viewer panel widget
pub struct AgentViewerPanel {
    manifest: Option<AgentManifest>,
    scroll_offset: u16,
    title: String,
}

impl AgentViewerPanel {
    /// Create an empty viewer
    pub fn new() -> Self {
        Self {
            manifest: None,
            scroll_offset: 0,
            title: "Agent".to_string(),
        }
    }

    /// Set custom title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Replace the displayed manifest
    pub fn update(&mut self, manifest: AgentManifest) {
        self.manifest = Some(manifest);
        self.scroll_offset = 0;
    }

    /// Remove the displayed manifest
    pub fn clear(&mut self) {
        self.manifest = None;
        self.scroll_offset = 0;
    }

    /// Currently displayed manifest
    pub fn manifest(&self) -> Option<&AgentManifest> {
        self.manifest.as_ref()
    }

    /// Handle a key press. Returns true when the key was consumed.
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('k') => self.scroll_offset = self.scroll_offset.saturating_sub(1),
            KeyCode::Char('j') => {
                let max = (self.lines().len() as u16).saturating_sub(1);
                self.scroll_offset = (self.scroll_offset + 1).min(max);
            }
            _ => return false,
        }
        true
    }

    /// Build the full content as styled lines
    fn lines(&self) -> Vec<Line<'static>> {
        let Some(manifest) = &self.manifest else {
            return vec![Line::from(Span::styled(
                "No agent loaded",
                Style::default()
                    .fg(PanelColors::MUTED)
                    .add_modifier(Modifier::ITALIC),
            ))];
        };

        let mut lines = Vec::new();

        // Identity header
        let mut header = vec![Span::styled(
            manifest.display_name().to_string(),
            Style::default()
                .fg(PanelColors::TEXT)
                .add_modifier(Modifier::BOLD),
        )];
        if !manifest.version.is_empty() {
            header.push(Span::styled(
                format!(" v{}", manifest.version),
                Style::default().fg(PanelColors::SECONDARY),
            ));
        }
        lines.push(Line::from(header));
        if !manifest.id.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("id: {}", manifest.id),
                Style::default().fg(PanelColors::SECONDARY),
            )));
        }
        if !manifest.description.is_empty() {
            lines.push(Line::from(Span::styled(
                manifest.description.clone(),
                Style::default().fg(PanelColors::MUTED),
            )));
        }
        lines.push(Line::default());

        // Capabilities
        lines.push(Line::from(Span::styled(
            "Capabilities",
            Style::default()
                .fg(PanelColors::HEADER)
                .add_modifier(Modifier::BOLD),
        )));
        if manifest.capabilities.is_empty() {
            lines.push(Line::from(Span::styled(
                "  No capabilities declared",
                Style::default()
                    .fg(PanelColors::MUTED)
                    .add_modifier(Modifier::ITALIC),
            )));
        } else {
            for (name, value) in &manifest.capabilities {
                lines.push(capability_line(name, value));
            }
        }
        lines.push(Line::default());

        // Tools
        lines.push(Line::from(Span::styled(
            format!("Tools ({})", manifest.tools.len()),
            Style::default()
                .fg(PanelColors::HEADER)
                .add_modifier(Modifier::BOLD),
        )));
        if manifest.tools.is_empty() {
            lines.push(Line::from(Span::styled(
                "  No tools defined",
                Style::default()
                    .fg(PanelColors::MUTED)
                    .add_modifier(Modifier::ITALIC),
            )));
        } else {
            for tool in &manifest.tools {
                let mut spans = vec![Span::styled(
                    format!("  {}", tool.name),
                    Style::default()
                        .fg(PanelColors::TEXT)
                        .add_modifier(Modifier::BOLD),
                )];
                if !tool.description.is_empty() {
                    spans.push(Span::styled(
                        format!("  {}", tool.description),
                        Style::default().fg(PanelColors::MUTED),
                    ));
                }
                lines.push(Line::from(spans));

                let params = tool.parameter_names();
                let summary = if params.is_empty() {
                    "    params: (none)".to_string()
                } else {
                    format!("    params: {}", params.join(", "))
                };
                let mut detail = vec![Span::styled(
                    summary,
                    Style::default().fg(PanelColors::SECONDARY),
                )];
                if tool.output_schema.is_some() {
                    detail.push(Span::styled(
                        "  → returns schema",
                        Style::default().fg(PanelColors::SECONDARY),
                    ));
                }
                lines.push(Line::from(detail));
            }
        }

        lines
    }

    /// Render the agent viewer panel
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(self.lines())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(self.title.clone())
                    .border_style(Style::default().fg(PanelColors::BORDER)),
            )
            .wrap(Wrap { trim: false })
            .scroll((self.scroll_offset, 0));

        frame.render_widget(paragraph, area);
    }
}

impl Default for AgentViewerPanel {
    fn default() -> Self {
        Self::new()
    }
}

/// One capability row with an enabled/disabled badge
fn capability_line(name: &str, value: &Value) -> Line<'static> {
    match value {
        Value::Bool(enabled) => {
            let state = if *enabled {
                StateType::Enabled
            } else {
                StateType::Disabled
            };
            Line::from(vec![
                Span::raw("  "),
                StateIndicator::new(state, name.to_string()).render(),
            ])
        }
        other => Line::from(vec![
            Span::raw("  "),
            StateIndicator::new(StateType::Info, name.to_string()).render(),
            Span::styled(
                format!(" = {other}"),
                Style::default().fg(PanelColors::SECONDARY),
            ),
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn line_text(line: &Line) -> String {
        line.spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect()
    }

    fn panel_text(panel: &AgentViewerPanel) -> String {
        panel
            .lines()
            .iter()
            .map(|line| line_text(line))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn sample_manifest() -> AgentManifest {
        serde_json::from_value(json!({
            "id": "agent-7",
            "name": "Scribe",
            "description": "Summarizes project activity",
            "version": "1.2.0",
            "capabilities": {
                "streaming": true,
                "sandbox": false,
                "max_depth": 3
            },
            "tools": [
                {
                    "name": "search",
                    "description": "Full-text search",
                    "input_schema": {
                        "type": "object",
                        "properties": {"query": {"type": "string"}}
                    },
                    "output_schema": {"type": "array"}
                },
                {
                    "name": "ping"
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_empty_viewer_shows_placeholder() {
        let panel = AgentViewerPanel::new();
        assert!(panel_text(&panel).contains("No agent loaded"));
    }

    #[test]
    fn test_identity_header() {
        let mut panel = AgentViewerPanel::new();
        panel.update(sample_manifest());

        let text = panel_text(&panel);
        assert!(text.contains("Scribe v1.2.0"));
        assert!(text.contains("id: agent-7"));
        assert!(text.contains("Summarizes project activity"));
    }

    #[test]
    fn test_capabilities_render_with_badges() {
        let mut panel = AgentViewerPanel::new();
        panel.update(sample_manifest());

        let text = panel_text(&panel);
        assert!(text.contains("✓ streaming"));
        assert!(text.contains("○ sandbox"));
        // Non-boolean values render inline
        assert!(text.contains("max_depth = 3"));
    }

    #[test]
    fn test_tools_render_with_parameter_summaries() {
        let mut panel = AgentViewerPanel::new();
        panel.update(sample_manifest());

        let text = panel_text(&panel);
        assert!(text.contains("Tools (2)"));
        assert!(text.contains("search"));
        assert!(text.contains("params: query"));
        assert!(text.contains("→ returns schema"));
        assert!(text.contains("params: (none)"));
    }

    #[test]
    fn test_missing_sections_degrade_to_placeholders() {
        let mut panel = AgentViewerPanel::new();
        panel.update(AgentManifest {
            name: "Bare".to_string(),
            capabilities: BTreeMap::new(),
            tools: Vec::new(),
            ..Default::default()
        });

        let text = panel_text(&panel);
        assert!(text.contains("No capabilities declared"));
        assert!(text.contains("No tools defined"));
    }

    #[test]
    fn test_scroll_keys() {
        let mut panel = AgentViewerPanel::new();
        panel.update(sample_manifest());

        assert!(panel.handle_key(KeyCode::Char('j')));
        assert!(panel.handle_key(KeyCode::Char('j')));
        assert_eq!(panel.scroll_offset, 2);

        assert!(panel.handle_key(KeyCode::Char('k')));
        assert_eq!(panel.scroll_offset, 1);

        // Unrelated keys pass through
        assert!(!panel.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn test_update_resets_scroll() {
        let mut panel = AgentViewerPanel::new();
        panel.update(sample_manifest());
        panel.handle_key(KeyCode::Char('j'));

        panel.update(sample_manifest());
        assert_eq!(panel.scroll_offset, 0);
    }
}
