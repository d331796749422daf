//! Consistent color palette for the panels
//!
//! Both panels use these constants so the dashboard reads as one surface.

use ratatui::style::Color;

/// Color palette for panel elements
pub struct PanelColors;

impl PanelColors {
    // === Status Colors ===

    /// Live capture, enabled capability (Green)
    pub const SUCCESS: Color = Color::Green;

    /// Paused capture, attention state (Yellow)
    pub const WARNING: Color = Color::Yellow;

    /// Failures and error-typed events (Red)
    pub const ERROR: Color = Color::Red;

    // === UI Elements ===

    /// Panel borders (Cyan)
    pub const BORDER: Color = Color::Cyan;

    /// Headers and labels (Yellow)
    pub const HEADER: Color = Color::Yellow;

    /// Primary row text (White)
    pub const TEXT: Color = Color::White;

    /// Secondary text: timestamps, sources (DarkGray)
    pub const SECONDARY: Color = Color::DarkGray;

    /// Placeholder and empty-state text (Gray)
    pub const MUTED: Color = Color::Gray;

    /// Palette cycled per event namespace
    pub const NAMESPACE: [Color; 6] = [
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::Green,
        Color::LightBlue,
        Color::LightMagenta,
    ];

    /// Stable color for a namespace prefix
    pub fn namespace_color(namespace: &str) -> Color {
        let index = namespace
            .bytes()
            .fold(0usize, |acc, b| acc.wrapping_add(b as usize));
        Self::NAMESPACE[index % Self::NAMESPACE.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_color_is_stable() {
        assert_eq!(
            PanelColors::namespace_color("panel"),
            PanelColors::namespace_color("panel")
        );
    }

    #[test]
    fn test_namespace_color_is_in_palette() {
        for ns in ["panel", "file", "agent", "net", ""] {
            assert!(PanelColors::NAMESPACE.contains(&PanelColors::namespace_color(ns)));
        }
    }
}
