use std::env;
use std::io;
use std::path::PathBuf;

use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::PlayerController;
use crate::audio::RodioBackend;
use crate::config::Settings;

mod event_loop;
mod logging;
mod startup;
mod terminal;

#[cfg(test)]
mod tests;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, fallback) = Settings::load_or_default();
    logging::init(&settings.log);
    if let Some(reason) = fallback {
        eprintln!("reprise: {reason}; using defaults");
        log::warn!("{reason}; using defaults");
    }

    let dir = env::args().nth(1).map(PathBuf::from);
    let playlist = startup::build_playlist(dir.as_deref(), &settings.playlist)?;
    log::info!("playlist ready: {} track(s)", playlist.len());

    let backend = RodioBackend::open_default(&settings.audio)?;
    let mut player = PlayerController::mount(playlist, backend);
    startup::apply_playback_defaults(&mut player, &settings.playback);

    let guard = terminal::TerminalGuard::enter(io::stdout(), true)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut player);

    player.unmount();
    drop(guard);

    run_result
}
