//! Panel management - visibility and layout for the dashboard

use ratatui::layout::Constraint;

/// Panel identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelId {
    Monitor,
    Agent,
}

impl PanelId {
    /// Get all panel IDs in display order
    pub fn all() -> Vec<PanelId> {
        vec![PanelId::Monitor, PanelId::Agent]
    }

    /// Get keyboard shortcut number
    pub fn shortcut_key(&self) -> char {
        match self {
            PanelId::Monitor => '1',
            PanelId::Agent => '2',
        }
    }

    /// Get panel name
    pub fn name(&self) -> &'static str {
        match self {
            PanelId::Monitor => "Events",
            PanelId::Agent => "Agent",
        }
    }
}

/// Panel manager - Controls visibility and layout
pub struct PanelManager {
    monitor_visible: bool,
    agent_visible: bool,
}

impl PanelManager {
    /// Create new panel manager with all panels visible
    pub fn new() -> Self {
        Self {
            monitor_visible: true,
            agent_visible: true,
        }
    }

    /// Check if panel is visible
    pub fn is_visible(&self, panel: PanelId) -> bool {
        match panel {
            PanelId::Monitor => self.monitor_visible,
            PanelId::Agent => self.agent_visible,
        }
    }

    /// Toggle panel visibility
    pub fn toggle(&mut self, panel: PanelId) {
        match panel {
            PanelId::Monitor => self.monitor_visible = !self.monitor_visible,
            PanelId::Agent => self.agent_visible = !self.agent_visible,
        }
    }

    /// Show all panels
    pub fn show_all(&mut self) {
        self.monitor_visible = true;
        self.agent_visible = true;
    }

    /// Hide all panels
    pub fn hide_all(&mut self) {
        self.monitor_visible = false;
        self.agent_visible = false;
    }

    /// Count visible panels
    pub fn visible_count(&self) -> usize {
        PanelId::all().iter().filter(|p| self.is_visible(**p)).count()
    }

    /// Get list of visible panels
    pub fn visible_panels(&self) -> Vec<PanelId> {
        PanelId::all()
            .into_iter()
            .filter(|p| self.is_visible(*p))
            .collect()
    }

    /// Get layout constraints for visible panels.
    ///
    /// The event monitor takes the remaining space; the agent viewer keeps a
    /// fixed band when both are shown.
    pub fn layout_constraints(&self) -> Vec<Constraint> {
        match (self.monitor_visible, self.agent_visible) {
            (true, true) => vec![Constraint::Min(10), Constraint::Length(14)],
            (true, false) => vec![Constraint::Min(10)],
            (false, true) => vec![Constraint::Min(6)],
            (false, false) => vec![Constraint::Min(0)],
        }
    }
}

impl Default for PanelManager {
    fn default() -> Self {
        Self::new()
    }
}
