use std::io;

use connect4_client::{ClientConfig, Connect4Client, GameApi, SessionController};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

mod app;
mod board_widget;
mod logging;
mod ui;

use app::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ClientConfig::from_env();
    logging::init_logging(&config)?;
    info!("🚀 Starting Connect Four against {}", config.server_url);

    let client = Connect4Client::new(&config.server_url)?;
    let mut app = App::new(SessionController::new(client));

    enable_raw_mode()?;
    let result = run_in_terminal(&mut app).await;

    // Restore terminal, even when setup or the app failed
    if let Err(e) = restore_terminal() {
        warn!("Failed to restore terminal: {}", e);
    }

    info!("Connect Four closed");
    result
}

async fn run_in_terminal<A: GameApi + 'static>(app: &mut App<A>) -> anyhow::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = app.run(&mut terminal).await;
    terminal.show_cursor()?;
    result
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)
}
