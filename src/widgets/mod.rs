//! Shared widgets for the panels

pub mod state_indicator;

pub use state_indicator::{StateIndicator, StateType};
