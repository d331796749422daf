//! Dashboard panels - the event monitor and the agent capability viewer
//!
//! Each panel is a self-contained widget owning its interaction state.
//! Rendering reads immutable snapshots from the core types; no panel
//! mutates data it did not create.

pub mod agent_viewer;
pub mod event_monitor;

pub use agent_viewer::AgentViewerPanel;
pub use event_monitor::EventMonitorPanel;
