//! Terminal setup and teardown.

use std::io::{self, IsTerminal, Stdout};

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::{ChartError, Result};

/// Terminal type the chart draws into.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Switches stdout to raw mode on the alternate screen and returns the
/// terminal together with its current size in cells.
///
/// # Errors
///
/// Returns [`ChartError::Io`] if stdout is not a TTY or any terminal call
/// fails. Raw mode is undone before returning an error.
pub fn setup_terminal() -> Result<(Tui, (u16, u16))> {
    if !io::stdout().is_terminal() {
        return Err(ChartError::Io(
            "the chart needs an interactive terminal (TTY)".to_string(),
        ));
    }

    enable_raw_mode().map_err(|e| ChartError::Io(format!("failed to enable raw mode: {e}")))?;
    install_panic_hook();

    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(ChartError::Io(format!(
            "failed to enter alternate screen: {e}"
        )));
    }

    let terminal = Terminal::new(CrosstermBackend::new(stdout)).map_err(|e| {
        let _ = leave();
        ChartError::Io(format!("failed to create terminal: {e}"))
    })?;

    let size = terminal.size().map_err(|e| {
        let _ = leave();
        ChartError::Io(format!("failed to query terminal size: {e}"))
    })?;

    Ok((terminal, (size.width, size.height)))
}

/// Restores the terminal to its original state.
///
/// # Errors
///
/// Returns [`ChartError::Io`] if leaving raw mode or the alternate screen
/// fails.
pub fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    leave().map_err(|e| ChartError::Io(e.to_string()))?;
    terminal
        .show_cursor()
        .map_err(|e| ChartError::Io(e.to_string()))
}

fn leave() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)
}

/// Leaves raw mode before a panic message is printed, so it stays readable.
fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = leave();
        previous(info);
    }));
}
