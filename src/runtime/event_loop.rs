use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};

use crate::app::PlayerController;
use crate::audio::MediaBackend;
use crate::config;
use crate::ui::{self, PanelView};

/// What the loop should do after an input event.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Main terminal event loop: pumps media events, draws the panel and
/// dispatches input. Returns `Ok(())` when the user quits.
pub fn run<B: MediaBackend>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    player: &mut PlayerController<B>,
) -> Result<(), Box<dyn std::error::Error>> {
    let poll_timeout = Duration::from_millis(settings.controls.poll_ms);
    let scrub_seconds = settings.controls.scrub_seconds as f64;
    let mut seek_bar = Rect::default();

    loop {
        player.pump();

        terminal.draw(|frame| {
            seek_bar = ui::panel_layout(frame.area(), &settings.ui).seek_bar;
            let view = PanelView::new(player.state(), player.playlist());
            ui::draw(frame, &view, &settings.ui, &settings.controls);
        })?;

        if !event::poll(poll_timeout)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                if handle_key(player, key, scrub_seconds) == Flow::Quit {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => handle_mouse(player, mouse, seek_bar),
            _ => {}
        }
    }
}

/// Translate one key press into a player action.
pub fn handle_key<B: MediaBackend>(
    player: &mut PlayerController<B>,
    key: KeyEvent,
    scrub_seconds: f64,
) -> Flow {
    if key.kind != KeyEventKind::Press {
        return Flow::Continue;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Flow::Quit,
        KeyCode::Char('q') | KeyCode::Esc => return Flow::Quit,
        KeyCode::Char(' ') | KeyCode::Char('p') => player.toggle_play_pause(),
        KeyCode::Char('n') | KeyCode::Char('l') => player.skip_track(),
        KeyCode::Char('r') => player.toggle_loop(),
        KeyCode::Char('H') | KeyCode::Left => player.seek_by(-scrub_seconds),
        KeyCode::Char('L') | KeyCode::Right => player.seek_by(scrub_seconds),
        KeyCode::Char(c) if c.is_ascii_digit() => {
            let tenth = f64::from(c.to_digit(10).unwrap_or(0));
            player.seek(tenth * 10.0);
        }
        _ => {}
    }
    Flow::Continue
}

/// Click or drag on the seek bar seeks to that point.
pub fn handle_mouse<B: MediaBackend>(
    player: &mut PlayerController<B>,
    mouse: MouseEvent,
    seek_bar: Rect,
) {
    if !matches!(
        mouse.kind,
        MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left)
    ) {
        return;
    }
    if let Some(value) = ui::seek_value_at(seek_bar, mouse.column, mouse.row) {
        player.seek(value);
    }
}
