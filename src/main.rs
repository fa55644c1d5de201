mod app;
mod config;
mod error;
mod format;
mod ingest;
mod library;
mod logging;
mod player;
mod playlist;
mod runtime;
mod ui;
mod view;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logging is best effort; the player runs without it.
    let _log_guard = match logging::init() {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("groove: logging disabled: {e}");
            None
        }
    };

    runtime::run()
}
