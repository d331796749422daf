//! Argus - Event monitor and agent capability panels
//!
//! Terminal panels for watching a host application's event stream and
//! inspecting agent descriptors:
//! - Bounded rolling capture over a wildcard event subscription
//! - Reactive case-insensitive type/source substring filtering
//! - Pass-through rendering of agent capability manifests
//!
//! # Architecture
//!
//! The crate is organized into two layers:
//! - **Core**: [`CaptureBuffer`], [`EventFilter`], and [`EventMonitor`] hold
//!   the capture and filtering logic with no UI coupling; consumers read
//!   immutable snapshots.
//! - **Presentation**: [`EventMonitorPanel`] and [`AgentViewerPanel`] bind
//!   that state to ratatui rendering and keyboard interaction.
//!
//! The host's event bus is an external collaborator modeled by
//! [`EventSource`]; wildcard delivery is an optional capability and its
//! absence degrades to an empty stream. [`EventBus`] is an in-memory
//! reference host used by the demo binary and the tests.
//!
//! # Example
//!
//! ```
//! use argus::{EventBus, EventMonitor, EventRecord, MonitorConfig};
//!
//! let bus = EventBus::new();
//! let monitor = EventMonitor::attach(&bus, MonitorConfig::default());
//!
//! bus.emit(&EventRecord::new("panel:toggle", "sidebar", serde_json::json!({})));
//! assert_eq!(monitor.len(), 1);
//! ```

pub mod bus;
pub mod capture;
pub mod colors;
pub mod config;
pub mod error;
pub mod event;
pub mod filter;
pub mod manifest;
pub mod monitor;
pub mod panels;
pub mod widgets;

// Re-export commonly used types
pub use bus::{EventBus, EventHandler, EventSource, SubscriptionHandle};
pub use capture::{CaptureBuffer, DEFAULT_MAX_EVENTS};
pub use colors::PanelColors;
pub use config::{DashConfig, MonitorConfig};
pub use error::{ArgusError, Result};
pub use event::{CapturedEvent, EventRecord};
pub use filter::{unique_sources, unique_types, EventFilter};
pub use manifest::{AgentManifest, ToolManifest};
pub use monitor::EventMonitor;
pub use panels::{AgentViewerPanel, EventMonitorPanel};
