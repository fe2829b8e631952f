use std::fs::File;
use std::path::Path;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tracing::{info, warn};

use candleterm::client::{BarSource, BarsClient};
use candleterm::config::fetch_config;
use candleterm::tui::event::{self, Action, Message};
use candleterm::tui::{App, Tui, render, restore_terminal, setup_terminal};
use candleterm::viewport::ViewportSnapshot;
use candleterm::{ChartError, credentials};

/// Interval between UI ticks (error expiry).
const TICK_INTERVAL_MS: u64 = 250;

#[tokio::main]
async fn main() -> Result<(), ChartError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let [flag, key] = args.as_slice()
        && flag == "--store-key"
    {
        credentials::save_api_key(key)?;
        println!("API key saved to the system keychain");
        return Ok(());
    }

    credentials::populate_env_from_keychain();
    let app_config = fetch_config()?;
    init_logging(app_config.chart.log_file.as_deref())?;

    let client = Arc::new(BarsClient::new(app_config.api.clone())?);
    let state_file = app_config.chart.state_file.clone();

    let mut app = match state_file.as_deref().map(ViewportSnapshot::load) {
        Some(Ok(Some(snapshot))) => {
            info!(timeframe = %snapshot.timeframe, "resuming saved viewport");
            App::restored(client.symbol(), app_config.chart.utc_offset, snapshot)
        }
        Some(Err(e)) => {
            warn!(error = %e, "ignoring saved viewport");
            let mut app = App::new(client.symbol(), app_config.chart.utc_offset);
            app.show_error(format!("saved viewport ignored: {e}"));
            app
        }
        _ => App::new(client.symbol(), app_config.chart.utc_offset),
    };

    let (mut terminal, (columns, rows)) = setup_terminal()?;
    let result = run(&mut terminal, &mut app, client, columns, rows).await;
    restore_terminal(&mut terminal)?;

    if let (Some(path), Some(snapshot)) = (state_file.as_deref(), app.screen.snapshot())
        && let Err(e) = snapshot.save(path)
    {
        warn!(error = %e, "failed to save viewport");
    }

    result
}

/// Runs the UI loop until the user quits.
async fn run<S: BarSource>(
    terminal: &mut Tui,
    app: &mut App,
    source: Arc<S>,
    columns: u16,
    rows: u16,
) -> Result<(), ChartError> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    event::spawn_event_reader(tx.clone());
    event::spawn_tick_timer(tx.clone(), TICK_INTERVAL_MS);

    let quit_tx = tx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = quit_tx.send(Message::Quit);
        }
    });

    event::update(app, Message::Input(event::Event::Resize(columns, rows)));
    let timeframe = app.timeframe();
    dispatch(event::load(app, timeframe), &source, &tx);

    while !app.should_quit {
        terminal
            .draw(|frame| render(frame, app))
            .map_err(|e| ChartError::Io(format!("failed to draw: {e}")))?;

        let Some(message) = rx.recv().await else {
            break;
        };
        if let Some(action) = event::update(app, message) {
            dispatch(action, &source, &tx);
        }
    }

    Ok(())
}

fn dispatch<S: BarSource>(action: Action, source: &Arc<S>, tx: &mpsc::UnboundedSender<Message>) {
    match action {
        Action::Load(ticket) => event::spawn_fetch(Arc::clone(source), ticket, tx.clone()),
    }
}

/// Sends logs to `path` when configured; the terminal itself is owned by the UI.
fn init_logging(path: Option<&Path>) -> Result<(), ChartError> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .map_err(|e| ChartError::Io(format!("failed to open log file {}: {e}", path.display())))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
