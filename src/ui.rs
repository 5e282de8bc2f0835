//! UI rendering helpers for the terminal user interface.
//!
//! `PanelView` is a pure projection of player state and playlist; `draw`
//! renders it with `ratatui`. Layout helpers are shared with the runtime so
//! mouse clicks can be mapped back onto the seek bar.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, LineGauge, Padding, Paragraph, Wrap},
};

use crate::app::PlayerState;
use crate::config::{ControlsSettings, UiSettings};
use crate::library::Playlist;

/// Width reserved on each side of the seek bar for the time labels.
const TIME_LABEL_WIDTH: u16 = 8;

/// Format seconds as `m:ss`. Non-finite or negative input renders as `0:00`.
pub fn format_time(secs: f64) -> String {
    if !secs.is_finite() || secs < 0.0 {
        return "0:00".to_string();
    }
    let total = secs.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Everything the panel shows, derived from state and playlist only.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelView<'a> {
    pub title: &'a str,
    pub artist: &'a str,
    pub cover_url: &'a str,
    pub elapsed: String,
    pub total: String,
    /// Seek-bar position in percent.
    pub slider: f64,
    pub play_label: &'static str,
    pub loop_label: &'static str,
    pub looping: bool,
    /// 1-based position in the playlist.
    pub position: usize,
    pub track_count: usize,
}

impl<'a> PanelView<'a> {
    pub fn new(state: &PlayerState, playlist: &'a Playlist) -> Self {
        let track = playlist.get(state.current_track_index);
        Self {
            title: &track.title,
            artist: &track.artist,
            cover_url: &track.cover_url,
            elapsed: format_time(state.progress_secs),
            total: format_time(state.duration_secs),
            slider: state.slider_value(),
            play_label: if state.is_playing { "Pause" } else { "Play" },
            loop_label: if state.is_looping { "Looping" } else { "Loop" },
            looping: state.is_looping,
            position: state.current_track_index + 1,
            track_count: playlist.len(),
        }
    }
}

/// Screen areas of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelAreas {
    pub header: Rect,
    pub cover: Option<Rect>,
    pub info: Rect,
    pub progress: Rect,
    pub seek_bar: Rect,
    pub transport: Rect,
    pub help: Rect,
}

/// Split `area` into the panel's boxes.
pub fn panel_layout(area: Rect, ui: &UiSettings) -> PanelAreas {
    let mut constraints = vec![Constraint::Length(3)];
    if ui.show_cover {
        constraints.push(Constraint::Length(4));
    }
    constraints.extend([
        Constraint::Length(4),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(3),
    ]);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let (cover, rest) = if ui.show_cover {
        (Some(chunks[1]), &chunks[2..])
    } else {
        (None, &chunks[1..])
    };

    let progress = rest[1];
    let inner = Block::default().borders(Borders::ALL).inner(progress);
    let row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(TIME_LABEL_WIDTH),
            Constraint::Min(1),
            Constraint::Length(TIME_LABEL_WIDTH),
        ])
        .split(inner);

    PanelAreas {
        header: chunks[0],
        cover,
        info: rest[0],
        progress,
        seek_bar: row[1],
        transport: rest[2],
        help: rest[3],
    }
}

/// Map a mouse position over the seek bar to a slider value in `[0, 100]`.
pub fn seek_value_at(bar: Rect, column: u16, row: u16) -> Option<f64> {
    if bar.width == 0
        || row < bar.y
        || row >= bar.y.saturating_add(bar.height)
        || column < bar.x
        || column >= bar.x.saturating_add(bar.width)
    {
        return None;
    }
    if bar.width == 1 {
        return Some(0.0);
    }
    let offset = f64::from(column - bar.x);
    Some(offset / f64::from(bar.width - 1) * 100.0)
}

/// Render the controls help text, incorporating scrub seconds.
fn controls_text(scrub_seconds: u64) -> String {
    [
        "[space/p] play/pause".to_string(),
        "[n/l] next".to_string(),
        "[r] loop".to_string(),
        format!("[H/L ←/→] scrub -/+{}s", scrub_seconds),
        "[0-9] jump".to_string(),
        "[click] seek".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

fn button(label: &str, active: bool) -> Span<'_> {
    let span = Span::raw(format!("[ {} ]", label));
    if active {
        span.add_modifier(Modifier::REVERSED)
    } else {
        span
    }
}

fn left_padded() -> Padding {
    Padding {
        left: 1,
        right: 0,
        top: 0,
        bottom: 0,
    }
}

/// Render the whole panel into `frame`.
pub fn draw(
    frame: &mut Frame,
    view: &PanelView,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let areas = panel_layout(frame.area(), ui_settings);

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" reprise ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, areas.header);

    if let Some(cover_area) = areas.cover {
        let cover = if view.cover_url.trim().is_empty() {
            "(no cover)"
        } else {
            view.cover_url
        };
        let cover_par = Paragraph::new(cover)
            .block(
                Block::bordered()
                    .padding(left_padded())
                    .title(" album art "),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(cover_par, cover_area);
    }

    let info = Paragraph::new(vec![
        Line::from(view.title).bold(),
        Line::from(view.artist),
    ])
    .block(
        Block::bordered()
            .padding(left_padded())
            .title(format!(" track {}/{} ", view.position, view.track_count)),
    );
    frame.render_widget(info, areas.info);

    let progress_block = Block::bordered().title(" progress ");
    let inner = progress_block.inner(areas.progress);
    frame.render_widget(progress_block, areas.progress);

    let labels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(TIME_LABEL_WIDTH),
            Constraint::Min(1),
            Constraint::Length(TIME_LABEL_WIDTH),
        ])
        .split(inner);
    frame.render_widget(
        Paragraph::new(view.elapsed.as_str()).alignment(Alignment::Center),
        labels[0],
    );
    let gauge = LineGauge::default()
        .ratio((view.slider / 100.0).clamp(0.0, 1.0))
        .label("")
        .filled_style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(gauge, areas.seek_bar);
    frame.render_widget(
        Paragraph::new(view.total.as_str()).alignment(Alignment::Center),
        labels[2],
    );

    let transport = Paragraph::new(Line::from(vec![
        button(view.play_label, false),
        Span::raw("  "),
        button("Next", false),
        Span::raw("  "),
        button(view.loop_label, view.looping),
    ]))
    .alignment(Alignment::Center)
    .block(Block::bordered().title(" controls "));
    frame.render_widget(transport, areas.transport);

    let help = Paragraph::new(controls_text(controls_settings.scrub_seconds))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" keys ")
                .padding(left_padded()),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(help, areas.help);
}
