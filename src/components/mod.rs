//! Leptos components for the benchmark UI.

pub mod control_panel;
pub mod graph_panel;

pub use control_panel::ControlPanel;
pub use graph_panel::GraphPanel;
