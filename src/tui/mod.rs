//! Terminal user interface for the chart.
//!
//! Ratatui is the rendering surface: key presses become zoom/pan gestures,
//! the viewport engine turns them into pixel geometry, and the chart
//! component draws that geometry on a braille canvas.

pub mod app;
pub mod components;
pub mod event;
pub mod terminal;
pub mod ui;

pub use app::App;
pub use event::{Action, Event, Message};
pub use terminal::{Tui, restore_terminal, setup_terminal};
pub use ui::render;
