use std::env;
use std::path::PathBuf;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

use crate::app::App;
use crate::player::{PlaybackController, RodioBackend};

mod event_loop;
mod settings;


pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    let backend = RodioBackend::open_default()?;
    let player = PlaybackController::new(backend, settings.audio.volume);
    let mut app = App::new(player, &settings);

    // Paths on the command line are the initial selection.
    let paths: Vec<PathBuf> = env::args_os().skip(1).map(PathBuf::from).collect();
    if !paths.is_empty() {
        info!(count = paths.len(), "ingesting command line paths");
        app.ingest_paths(&paths);
    }

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("shutting down");
    run_result
}
