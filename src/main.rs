use std::io;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use imptrack::config::AppConfig;
use imptrack::core::logging;
use imptrack::tui::app::AppState;
use imptrack::tui::services::Services;

#[tokio::main]
async fn main() -> io::Result<()> {
    // Guard must outlive the app so buffered log lines are flushed.
    let _log_guard = logging::init();
    log::info!("{} v{} starting", imptrack::NAME, imptrack::VERSION);

    let config = AppConfig::load();

    let (event_tx, event_rx) = mpsc::unbounded_channel();

    // Kick off the data fetch before the first frame renders.
    let services = Services::new(&config, event_tx.clone());
    services.spawn_fetch();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = AppState::new(event_rx, event_tx);
    let result = app
        .run(&mut terminal, Duration::from_millis(config.tui.tick_rate_ms))
        .await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        log::error!("Application error: {err}");
        eprintln!("Error: {err}");
    }
    result
}
