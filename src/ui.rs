//! UI rendering helpers for the terminal user interface.
//!
//! Everything here reads presenter data from `App`; nothing mutates state.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Tabs, Wrap},
};

use crate::app::{App, LibraryRow};
use crate::config::{Settings, resolve_config_path};
use crate::logging;
use crate::player::{AudioBackend, PlayerStatus};
use crate::view::ViewId;

/// Keys shown in the footer for every view, followed by the view's own keys.
fn controls_text(view: ViewId, seek_seconds: f64) -> String {
    let mut keys: Vec<String> = vec![
        "[1-6/tab] views".to_string(),
        "[space] play/pause".to_string(),
        "[s] stop".to_string(),
        "[h/l] prev/next".to_string(),
        format!("[←/→] -/+{}s", seek_seconds),
        "[-/+] volume".to_string(),
    ];
    let own: &[&str] = match view {
        ViewId::Home => &["[enter] start listening"],
        ViewId::Upload => &["[f] add files", "[d] add folder"],
        ViewId::Library => &["[j/k] move", "[enter] play"],
        ViewId::NowPlaying => &["click/drag bar to seek"],
        ViewId::Playlists => &["[c] new", "[[/]] playlist", "[j/k] song", "[enter] add"],
        ViewId::Settings => &[],
    };
    keys.extend(own.iter().map(|s| s.to_string()));
    keys.push("[q] quit".to_string());
    keys.join(" | ")
}

fn padded(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(3);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Render the whole UI. Returns the progress bar's area when one was drawn,
/// so pointer events can be mapped onto it.
pub fn draw<B: AudioBackend>(frame: &mut Frame, app: &App<B>, settings: &Settings) -> Option<Rect> {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let active = app.router.active();
    let titles: Vec<String> = ViewId::ALL
        .iter()
        .enumerate()
        .map(|(i, v)| format!("{} {}", i + 1, v.title()))
        .collect();
    let tabs = Tabs::new(titles)
        .select(active.position())
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" groove ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(tabs, chunks[0]);

    let body = chunks[1];
    let progress_area = match active {
        ViewId::Home => {
            draw_home(frame, app, settings, body);
            None
        }
        ViewId::Upload => {
            draw_upload(frame, app, body);
            None
        }
        ViewId::Library => {
            draw_library(frame, app, body);
            None
        }
        ViewId::NowPlaying => Some(draw_now_playing(frame, app, body)),
        ViewId::Playlists => {
            draw_playlists(frame, app, body);
            None
        }
        ViewId::Settings => {
            draw_settings(frame, settings, body);
            None
        }
    };

    let footer = Paragraph::new(controls_text(active, settings.audio.seek_seconds))
        .block(padded(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[2]);

    if let Some(input) = &app.input {
        let area = centered_rect_sized(60, 3, body);
        frame.render_widget(Clear, area);
        let text = format!("{}▏", input.buffer);
        let title = format!(" {} (enter: ok, esc: cancel) ", input.mode.prompt());
        frame.render_widget(Paragraph::new(text).block(padded(&title)), area);
    }

    if let Some(notice) = &app.notice {
        let area = centered_rect_sized(50, 5, body);
        frame.render_widget(Clear, area);
        let p = Paragraph::new(notice.as_str())
            .alignment(Alignment::Center)
            .block(padded(" notice (any key) "))
            .wrap(Wrap { trim: true });
        frame.render_widget(p, area);
    }

    progress_area
}

fn draw_home<B: AudioBackend>(frame: &mut Frame, app: &App<B>, settings: &Settings, area: Rect) {
    let count = app.library.len();
    let hint = if count == 0 {
        "No songs yet. Press enter to add some.".to_string()
    } else {
        format!("{count} song(s) loaded. Press enter to start listening.")
    };
    let text = vec![
        Line::from(""),
        Line::from(settings.ui.header_text.as_str()),
        Line::from(""),
        Line::from(hint),
    ];
    let p = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::bordered().title(" home "));
    frame.render_widget(p, area);
}

fn draw_upload<B: AudioBackend>(frame: &mut Frame, app: &App<B>, area: Rect) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let status = app.upload_status();
    let exts = app.library_settings().extensions.join(", ");
    let text = vec![
        Line::from("[f] select one or more files"),
        Line::from("[d] select a whole folder"),
        Line::from(format!("Accepted: {exts}")),
        Line::from(status.message.as_str()),
    ];
    let title = if app.is_ingesting() { " upload (processing) " } else { " upload " };
    frame.render_widget(Paragraph::new(text).block(padded(title)), parts[0]);

    if let Some(p) = status.progress {
        let gauge = Gauge::default()
            .block(Block::bordered().title(" progress "))
            .gauge_style(Style::default().add_modifier(Modifier::BOLD))
            .percent(u16::from(p.percent().min(100)))
            .label(format!("{}% ({}/{})", p.percent(), p.processed, p.total));
        frame.render_widget(gauge, parts[1]);
    }
}

fn song_item(row: &LibraryRow) -> ListItem<'static> {
    let marker = if row.now_playing { "▶ " } else { "  " };
    ListItem::new(format!("{marker}{}  [{}]", row.name, row.duration))
}

fn draw_library<B: AudioBackend>(frame: &mut Frame, app: &App<B>, area: Rect) {
    let rows = app.library_rows();
    if rows.is_empty() {
        let p = Paragraph::new("No songs uploaded yet. Go to Upload to add music.")
            .block(Block::bordered().title(" library "));
        frame.render_widget(p, area);
        return;
    }

    let items: Vec<ListItem> = rows.iter().map(song_item).collect();
    let list = List::new(items)
        .block(Block::bordered().title(format!(" library ({}) ", rows.len())))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    state.select(Some(app.selected.min(rows.len() - 1)));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_now_playing<B: AudioBackend>(frame: &mut Frame, app: &App<B>, area: Rect) -> Rect {
    let np = app.now_playing();
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let status = match np.status {
        PlayerStatus::Empty => "Stopped",
        PlayerStatus::Paused => "⏸ Paused",
        PlayerStatus::Playing => "▶ Playing",
    };
    let text = vec![
        Line::from(np.title.clone()).style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(np.filename.clone()),
        Line::from(format!("{status} • Volume {}%", np.volume_percent)),
    ];
    frame.render_widget(
        Paragraph::new(text).block(padded(" now playing ")),
        parts[0],
    );

    let total = if app.player.awaiting_metadata() {
        "…".to_string()
    } else {
        np.total
    };
    let bar_style = if app.player.is_dragging() {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let gauge = Gauge::default()
        .block(Block::bordered().title(format!(" {} / {total} ", np.elapsed)))
        .gauge_style(bar_style)
        .ratio(np.fraction.clamp(0.0, 1.0))
        .label("");
    frame.render_widget(gauge, parts[1]);

    // Inner area of the bordered gauge.
    Rect {
        x: parts[1].x + 1,
        y: parts[1].y + 1,
        width: parts[1].width.saturating_sub(2),
        height: parts[1].height.saturating_sub(2),
    }
}

fn draw_playlists<B: AudioBackend>(frame: &mut Frame, app: &App<B>, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);

    let playlists = app.playlists.playlists();
    if playlists.is_empty() {
        let p = Paragraph::new("No playlists yet. Press c to create one.")
            .block(Block::bordered().title(" playlists "))
            .wrap(Wrap { trim: true });
        frame.render_widget(p, cols[0]);
    } else {
        let items: Vec<ListItem> = playlists
            .iter()
            .map(|p| {
                ListItem::new(format!(
                    "{} ({})",
                    crate::format::escape_for_display(&p.name),
                    p.track_indices.len()
                ))
            })
            .collect();
        let list = List::new(items)
            .block(Block::bordered().title(" playlists "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        state.select(Some(app.playlist_cursor.min(playlists.len() - 1)));
        frame.render_stateful_widget(list, cols[0], &mut state);
    }

    let current = app.current_playlist();
    let title = match current {
        Some(p) => format!(" songs → {} ", crate::format::escape_for_display(&p.name)),
        None => " songs ".to_string(),
    };
    let rows = app.library_rows();
    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| {
            let mark = if current.is_some_and(|p| p.contains(row.index)) {
                "✓"
            } else {
                "+"
            };
            ListItem::new(format!("[{mark}] {}", row.name))
        })
        .collect();
    let list = List::new(items)
        .block(Block::bordered().title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default();
    if !rows.is_empty() {
        state.select(Some(app.selected.min(rows.len() - 1)));
    }
    frame.render_stateful_widget(list, cols[1], &mut state);
}

fn draw_settings(frame: &mut Frame, settings: &Settings, area: Rect) {
    let config_path = resolve_config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "-".to_string());
    let log_dir = logging::log_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "-".to_string());
    let lib = &settings.library;
    let text = format!(
        "Config file: {config_path}\nLog directory: {log_dir}\n\n\
         Seek step: {}s\nVolume step: {}%\n\n\
         Extensions: {}\nRecursive: {}\nInclude hidden: {}\nFollow links: {}\nBatch size: {}",
        settings.audio.seek_seconds,
        (settings.audio.volume_step * 100.0).round(),
        lib.extensions.join(", "),
        lib.recursive,
        lib.include_hidden,
        lib.follow_links,
        lib.ingest_batch_size,
    );
    let p = Paragraph::new(text)
        .block(padded(" settings "))
        .wrap(Wrap { trim: true });
    frame.render_widget(p, area);
}
