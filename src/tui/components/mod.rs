//! Reusable UI components.

pub mod chart;
pub mod keybindings;
pub mod status_bar;
pub mod timeframe_bar;
