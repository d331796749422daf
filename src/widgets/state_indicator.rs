//! State indicator widget - Color-coded status badges

use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::colors::PanelColors;

/// State types for visual indication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateType {
    /// Capture is live
    Live,
    /// Capture is paused
    Paused,
    /// Capability is enabled
    Enabled,
    /// Capability is disabled
    Disabled,
    /// Neutral informational badge
    Info,
    /// Error or failure state
    Failed,
}

/// State indicator widget
pub struct StateIndicator {
    state_type: StateType,
    text: String,
    show_icon: bool,
}

impl StateIndicator {
    /// Create new state indicator
    pub fn new(state_type: StateType, text: impl Into<String>) -> Self {
        Self {
            state_type,
            text: text.into(),
            show_icon: true,
        }
    }

    /// Set whether to show icon
    pub fn show_icon(mut self, show: bool) -> Self {
        self.show_icon = show;
        self
    }

    /// Get color for this state type
    fn color(&self) -> ratatui::style::Color {
        match self.state_type {
            StateType::Live => PanelColors::SUCCESS,
            StateType::Paused => PanelColors::WARNING,
            StateType::Enabled => PanelColors::SUCCESS,
            StateType::Disabled => PanelColors::SECONDARY,
            StateType::Info => PanelColors::BORDER,
            StateType::Failed => PanelColors::ERROR,
        }
    }

    /// Get icon/symbol for this state type
    fn icon(&self) -> &'static str {
        match self.state_type {
            StateType::Live => "●",
            StateType::Paused => "◼",
            StateType::Enabled => "✓",
            StateType::Disabled => "○",
            StateType::Info => "•",
            StateType::Failed => "✗",
        }
    }

    /// Render as a styled span
    pub fn render(&self) -> Span<'static> {
        let content = if self.show_icon {
            format!("{} {}", self.icon(), self.text)
        } else {
            self.text.clone()
        };

        Span::styled(
            content,
            Style::default()
                .fg(self.color())
                .add_modifier(Modifier::BOLD),
        )
    }

    /// Render just the icon (no text)
    pub fn render_icon_only(&self) -> Span<'static> {
        Span::styled(
            self.icon().to_string(),
            Style::default()
                .fg(self.color())
                .add_modifier(Modifier::BOLD),
        )
    }

    /// Get the underlying text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the state type
    pub fn state_type(&self) -> StateType {
        self.state_type
    }
}
