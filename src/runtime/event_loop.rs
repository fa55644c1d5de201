use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::debug;

use crate::app::{App, InputMode};
use crate::config;
use crate::player::AudioBackend;
use crate::ui;
use crate::view::ViewId;

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Where the progress bar was drawn last frame, if it was drawn.
    pub progress_area: Option<Rect>,
}

/// Main terminal event loop: advances background work, draws, and handles
/// input. Returns `Ok(())` when shutdown is requested.
pub fn run<B: AudioBackend>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App<B>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = EventLoopState::default();
    let tick = Duration::from_millis(settings.ui.tick_ms.max(1));

    loop {
        // One ingestion chunk per iteration keeps input responsive.
        app.tick(Instant::now());

        let mut progress_area = None;
        terminal.draw(|f| progress_area = ui::draw(f, app, settings))?;
        state.progress_area = progress_area;

        if event::poll(tick)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if handle_key_event(key, app) {
                        break;
                    }
                }
                Event::Mouse(mouse) => handle_mouse_event(mouse, app, &state),
                _ => {}
            }
        }
    }

    Ok(())
}

/// Apply one key press. Returns true when the user asked to quit.
pub(super) fn handle_key_event<B: AudioBackend>(key: KeyEvent, app: &mut App<B>) -> bool {
    if app.notice.is_some() {
        app.dismiss_notice();
        return false;
    }

    if app.input.is_some() {
        match key.code {
            KeyCode::Esc => app.cancel_input(),
            KeyCode::Enter => app.submit_input(),
            KeyCode::Backspace => app.pop_input(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.push_input(c)
            }
            _ => {}
        }
        return false;
    }

    if handle_view_key(key, app) {
        return false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Tab => app.router.next(),
        KeyCode::BackTab => app.router.previous(),
        KeyCode::Char(c @ '1'..='6') => {
            let slot = c as usize - '1' as usize;
            if let Some(&view) = ViewId::ALL.get(slot) {
                app.router.switch_to(view);
            }
        }
        KeyCode::Char(' ') => app.toggle_play_pause(),
        KeyCode::Char('s') => app.stop(),
        KeyCode::Char('l') => app.next_track(),
        KeyCode::Char('h') => app.previous_track(),
        KeyCode::Left => app.rewind(),
        KeyCode::Right => app.fast_forward(),
        KeyCode::Char('+') | KeyCode::Char('=') => app.volume_up(),
        KeyCode::Char('-') => app.volume_down(),
        other => debug!(?other, "unbound key"),
    }
    false
}

/// Keys that only mean something on the active view. Returns true when consumed.
fn handle_view_key<B: AudioBackend>(key: KeyEvent, app: &mut App<B>) -> bool {
    match (app.router.active(), key.code) {
        (ViewId::Home, KeyCode::Enter) => app.start_listening(),

        (ViewId::Upload, KeyCode::Char('f')) => app.begin_input(InputMode::FilePaths),
        (ViewId::Upload, KeyCode::Char('d')) => app.begin_input(InputMode::Directory),

        (ViewId::Library, KeyCode::Char('j') | KeyCode::Down) => app.select_next(),
        (ViewId::Library, KeyCode::Char('k') | KeyCode::Up) => app.select_prev(),
        (ViewId::Library, KeyCode::Enter) => app.play_selected(),

        (ViewId::Playlists, KeyCode::Char('c')) if key.modifiers.is_empty() => {
            app.begin_input(InputMode::PlaylistName)
        }
        (ViewId::Playlists, KeyCode::Char('j') | KeyCode::Down) => app.select_next(),
        (ViewId::Playlists, KeyCode::Char('k') | KeyCode::Up) => app.select_prev(),
        (ViewId::Playlists, KeyCode::Char(']')) => app.next_playlist(),
        (ViewId::Playlists, KeyCode::Char('[')) => app.prev_playlist(),
        (ViewId::Playlists, KeyCode::Enter | KeyCode::Char('a')) => {
            app.add_selected_to_playlist();
        }

        _ => return false,
    }
    true
}

/// Map pointer events onto the progress bar. A drag starts on the bar and
/// follows the pointer until the button is released anywhere.
pub(super) fn handle_mouse_event<B: AudioBackend>(
    mouse: MouseEvent,
    app: &mut App<B>,
    state: &EventLoopState,
) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if !app.router.is_active(ViewId::NowPlaying) {
                return;
            }
            let Some(area) = state.progress_area else {
                return;
            };
            if contains(area, mouse.column, mouse.row) {
                app.player.begin_drag();
                app.player.seek_to_fraction(column_fraction(area, mouse.column));
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some(area) = state.progress_area {
                app.player.drag_to(column_fraction(area, mouse.column));
            }
        }
        MouseEventKind::Up(MouseButton::Left) => app.player.end_drag(),
        _ => {}
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

/// Horizontal position of `column` across `area`, clamped to 0..=1.
pub(super) fn column_fraction(area: Rect, column: u16) -> f64 {
    let span = area.width.saturating_sub(1).max(1);
    let offset = column.saturating_sub(area.x).min(span);
    f64::from(offset) / f64::from(span)
}
