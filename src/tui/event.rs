//! Event handling for the TUI.
//!
//! Terminal input, timer ticks and finished bar loads all arrive as
//! [`Message`]s on one channel and are applied to [`App`] one at a time by
//! [`update`], so the viewport is only ever touched from the UI loop.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;
use tracing::debug;

use crate::client::BarSource;
use crate::models::{Bar, Timeframe};
use crate::screen::LoadTicket;

use super::app::{App, PAN_STEP_BARS};
use super::ui;

/// Events that can occur in the application.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized to (columns, rows).
    Resize(u16, u16),
    /// Periodic tick for UI updates.
    Tick,
}

/// Messages that update application state.
#[derive(Debug)]
pub enum Message {
    /// Input event from terminal.
    Input(Event),
    /// A bar request finished, successfully or not.
    BarsLoaded {
        ticket: LoadTicket,
        result: crate::Result<Vec<Bar>>,
    },
    /// Request to quit the application.
    Quit,
}

/// Actions that require external handling (spawning network work).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Fetch bars for the ticket's timeframe.
    Load(LoadTicket),
}

/// Spawns a task that polls for terminal events and sends them to a channel.
pub fn spawn_event_reader(tx: mpsc::UnboundedSender<Message>) {
    tokio::spawn(async move {
        loop {
            // Poll for events with a 50ms timeout
            match tokio::task::spawn_blocking(|| {
                if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            })
            .await
            {
                Ok(Some(CrosstermEvent::Key(key))) if key.kind != KeyEventKind::Release => {
                    if tx.send(Message::Input(Event::Key(key))).is_err() {
                        break;
                    }
                }
                Ok(Some(CrosstermEvent::Resize(w, h))) => {
                    if tx.send(Message::Input(Event::Resize(w, h))).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
    });
}

/// Spawns a task that sends periodic tick events.
pub fn spawn_tick_timer(tx: mpsc::UnboundedSender<Message>, interval_ms: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
        loop {
            interval.tick().await;
            if tx.send(Message::Input(Event::Tick)).is_err() {
                break;
            }
        }
    });
}

/// Spawns a task that fetches bars for `ticket` and posts the result back.
///
/// Superseded requests are not cancelled; their results are discarded by
/// the screen when they arrive.
pub fn spawn_fetch<S: BarSource>(
    source: Arc<S>,
    ticket: LoadTicket,
    tx: mpsc::UnboundedSender<Message>,
) {
    tokio::spawn(async move {
        let result = source.fetch_bars(ticket.timeframe).await;
        if tx.send(Message::BarsLoaded { ticket, result }).is_err() {
            debug!(generation = ticket.generation, "ui loop gone before bars arrived");
        }
    });
}

/// Updates application state based on a message.
pub fn update(app: &mut App, message: Message) -> Option<Action> {
    match message {
        Message::Input(event) => handle_input(app, event),
        Message::BarsLoaded { ticket, result } => {
            app.screen.finish_load(ticket, result);
            None
        }
        Message::Quit => {
            app.should_quit = true;
            None
        }
    }
}

/// Starts loading `timeframe` and returns the action that performs the fetch.
pub fn load(app: &mut App, timeframe: Timeframe) -> Action {
    Action::Load(app.screen.begin_load(timeframe))
}

/// Handles input events and updates application state.
fn handle_input(app: &mut App, event: Event) -> Option<Action> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Resize(columns, rows) => {
            let (width, height) = ui::chart_canvas_size(columns, rows);
            app.screen.resize(width, height);
            None
        }
        Event::Tick => {
            app.clear_stale_errors();
            None
        }
    }
}

/// Handles key press events.
fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
            None
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            None
        }

        // Timeframe selector
        KeyCode::Char(c @ '1'..='4') => {
            let index = c as usize - '1' as usize;
            Timeframe::from_index(index).map(|tf| load(app, tf))
        }
        KeyCode::Tab => {
            let next = app.timeframe().next();
            Some(load(app, next))
        }
        KeyCode::Char('r') => {
            let current = app.timeframe();
            Some(load(app, current))
        }

        // Zoom
        KeyCode::Char('+') | KeyCode::Char('=') => {
            app.zoom(1);
            None
        }
        KeyCode::Char('-') => {
            app.zoom(-1);
            None
        }

        // Pan: left reveals older bars
        KeyCode::Char('h') | KeyCode::Left => {
            app.pan_bars(PAN_STEP_BARS);
            None
        }
        KeyCode::Char('l') | KeyCode::Right => {
            app.pan_bars(-PAN_STEP_BARS);
            None
        }
        KeyCode::Char('H') | KeyCode::PageUp => {
            app.pan_pages(1.0);
            None
        }
        KeyCode::Char('L') | KeyCode::PageDown => {
            app.pan_pages(-1.0);
            None
        }
        KeyCode::Home => {
            app.screen.scroll_to_latest();
            None
        }

        _ => None,
    }
}
