use std::cell::Cell;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::rc::Rc;

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use tempfile::tempdir;

use super::event_loop::{Flow, handle_key, handle_mouse};
use super::startup::{apply_playback_defaults, build_playlist};
use super::terminal::TerminalGuard;
use crate::app::PlayerController;
use crate::audio::MediaEvent;
use crate::audio::scripted::{Call, ScriptedBackend, Shared};
use crate::config::{PlaybackSettings, PlaylistSettings, TrackEntry};
use crate::library::LibraryError;

fn mounted() -> (PlayerController<ScriptedBackend>, Shared) {
    let playlist = build_playlist(None, &PlaylistSettings::default()).unwrap();
    let backend = ScriptedBackend::default();
    let script = backend.script();
    (PlayerController::mount(playlist, backend), script)
}

fn settle(c: &mut PlayerController<ScriptedBackend>) {
    while c.pump() > 0 {}
}

/// Mount and report a 100 second duration so percent and seconds line up.
fn mounted_with_duration() -> (PlayerController<ScriptedBackend>, Shared) {
    let (mut c, script) = mounted();
    script.borrow().emitters[0].emit(MediaEvent::LoadedMetadata { duration: 100.0 });
    settle(&mut c);
    (c, script)
}

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn click(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

fn entry(title: &str, source: &str, cover_url: &str) -> TrackEntry {
    TrackEntry {
        title: title.into(),
        artist: String::new(),
        source: PathBuf::from(source),
        cover_url: cover_url.into(),
    }
}

// --- startup ---------------------------------------------------------------

#[test]
fn build_playlist_defaults_to_builtin_tracks() {
    let playlist = build_playlist(None, &PlaylistSettings::default()).unwrap();
    assert_eq!(playlist.len(), 3);
    assert_eq!(playlist.get(0).title, "Jailer BGM");
    assert_eq!(playlist.get(0).source, PathBuf::from("assets/Track1.mp3"));
}

#[test]
fn build_playlist_prefers_configured_tracks() {
    let settings = PlaylistSettings {
        assets_dir: PathBuf::from("/music"),
        default_cover_url: "https://example.com/cover.png".into(),
        tracks: vec![
            entry("One", "one.mp3", ""),
            entry("Two", "/elsewhere/two.mp3", "https://example.com/two.png"),
        ],
        ..PlaylistSettings::default()
    };

    let playlist = build_playlist(None, &settings).unwrap();
    assert_eq!(playlist.len(), 2);
    assert_eq!(playlist.get(0).title, "One");
    assert_eq!(playlist.get(1).title, "Two");
    assert_eq!(playlist.get(0).source, PathBuf::from("/music/one.mp3"));
    assert_eq!(playlist.get(0).cover_url, "https://example.com/cover.png");
    assert_eq!(playlist.get(1).source, PathBuf::from("/elsewhere/two.mp3"));
    assert_eq!(playlist.get(1).cover_url, "https://example.com/two.png");
}

#[test]
fn build_playlist_scans_directory_argument_first() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("song.flac"), b"not really flac").unwrap();
    let settings = PlaylistSettings {
        tracks: vec![entry("Configured", "x.mp3", "")],
        ..PlaylistSettings::default()
    };

    let playlist = build_playlist(Some(dir.path()), &settings).unwrap();
    assert_eq!(playlist.len(), 1);
    assert_eq!(playlist.get(0).title, "song");
}

#[test]
fn build_playlist_rejects_directory_without_audio() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("notes.txt"), b"hello").unwrap();

    let err = build_playlist(Some(dir.path()), &PlaylistSettings::default()).unwrap_err();
    assert_eq!(err, LibraryError::EmptyPlaylist);
}

#[test]
fn playback_defaults_start_looping_and_playing() {
    let (mut c, script) = mounted();
    apply_playback_defaults(
        &mut c,
        &PlaybackSettings {
            looping: true,
            autoplay: true,
        },
    );
    settle(&mut c);

    assert!(c.state().is_looping);
    assert!(c.state().is_playing);
    assert!(script.borrow().calls.contains(&Call::Loop(0, true)));
}

#[test]
fn playback_defaults_off_leave_player_idle() {
    let (mut c, _script) = mounted();
    apply_playback_defaults(&mut c, &PlaybackSettings::default());
    settle(&mut c);

    assert!(!c.state().is_looping);
    assert!(!c.state().is_playing);
}

// --- input -----------------------------------------------------------------

#[test]
fn quit_keys_stop_the_loop() {
    let (mut c, _script) = mounted();
    assert_eq!(handle_key(&mut c, press(KeyCode::Char('q')), 5.0), Flow::Quit);
    assert_eq!(handle_key(&mut c, press(KeyCode::Esc), 5.0), Flow::Quit);
    let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert_eq!(handle_key(&mut c, ctrl_c, 5.0), Flow::Quit);
    assert_eq!(handle_key(&mut c, press(KeyCode::Char('c')), 5.0), Flow::Continue);
}

#[test]
fn transport_keys_drive_the_player() {
    let (mut c, _script) = mounted();

    handle_key(&mut c, press(KeyCode::Char(' ')), 5.0);
    settle(&mut c);
    assert!(c.state().is_playing);

    handle_key(&mut c, press(KeyCode::Char('p')), 5.0);
    settle(&mut c);
    assert!(!c.state().is_playing);

    handle_key(&mut c, press(KeyCode::Char('r')), 5.0);
    assert!(c.state().is_looping);

    handle_key(&mut c, press(KeyCode::Char('n')), 5.0);
    settle(&mut c);
    assert_eq!(c.state().current_track_index, 1);
    assert!(c.state().is_playing);
    assert!(c.state().is_looping);
}

#[test]
fn key_release_is_ignored() {
    let (mut c, _script) = mounted();
    let release = KeyEvent::new_with_kind(
        KeyCode::Char('n'),
        KeyModifiers::NONE,
        KeyEventKind::Release,
    );
    assert_eq!(handle_key(&mut c, release, 5.0), Flow::Continue);
    assert_eq!(c.state().current_track_index, 0);
}

#[test]
fn digit_keys_seek_to_tenths() {
    let (mut c, script) = mounted_with_duration();

    handle_key(&mut c, press(KeyCode::Char('5')), 5.0);
    assert_eq!(c.state().progress_secs, 50.0);
    assert!(script.borrow().calls.contains(&Call::Seek(0, 50.0)));

    handle_key(&mut c, press(KeyCode::Char('0')), 5.0);
    assert_eq!(c.state().progress_secs, 0.0);
}

#[test]
fn scrub_keys_move_by_configured_seconds() {
    let (mut c, _script) = mounted_with_duration();
    handle_key(&mut c, press(KeyCode::Char('4')), 5.0);

    handle_key(&mut c, press(KeyCode::Right), 5.0);
    assert_eq!(c.state().progress_secs, 45.0);
    handle_key(&mut c, press(KeyCode::Char('H')), 5.0);
    handle_key(&mut c, press(KeyCode::Left), 5.0);
    assert_eq!(c.state().progress_secs, 35.0);
}

#[test]
fn mouse_on_seek_bar_seeks() {
    let (mut c, _script) = mounted_with_duration();
    let bar = Rect::new(10, 5, 11, 1);

    handle_mouse(&mut c, click(MouseEventKind::Down(MouseButton::Left), 15, 5), bar);
    assert_eq!(c.state().progress_secs, 50.0);

    handle_mouse(&mut c, click(MouseEventKind::Drag(MouseButton::Left), 20, 5), bar);
    assert_eq!(c.state().progress_secs, 100.0);
}

#[test]
fn mouse_outside_seek_bar_or_other_buttons_do_nothing() {
    let (mut c, script) = mounted_with_duration();
    let bar = Rect::new(10, 5, 11, 1);
    script.borrow_mut().calls.clear();

    handle_mouse(&mut c, click(MouseEventKind::Down(MouseButton::Left), 15, 6), bar);
    handle_mouse(&mut c, click(MouseEventKind::Down(MouseButton::Right), 15, 5), bar);
    handle_mouse(&mut c, click(MouseEventKind::Moved, 15, 5), bar);

    assert_eq!(c.state().progress_secs, 0.0);
    assert!(script.borrow().calls.is_empty());
}

// --- terminal --------------------------------------------------------------

const ENTER_ALT_SCREEN: &str = "\x1b[?1049h";
const LEAVE_ALT_SCREEN: &str = "\x1b[?1049l";

/// Writer that rejects every write and counts the attempts.
struct Broken(Rc<Cell<usize>>);

impl Write for Broken {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        self.0.set(self.0.get() + 1);
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn terminal_guard_restores_screen_on_drop() {
    let mut out = Vec::new();
    {
        let _guard = TerminalGuard::enter(&mut out, false).unwrap();
    }
    let text = String::from_utf8(out).unwrap();

    let entered = text.find(ENTER_ALT_SCREEN).unwrap();
    let left = text.find(LEAVE_ALT_SCREEN).unwrap();
    assert!(entered < left);
}

#[test]
fn terminal_guard_restores_when_setup_fails() {
    let attempts = Rc::new(Cell::new(0));

    let result = TerminalGuard::enter(Broken(attempts.clone()), false);

    assert!(result.is_err());
    // One failed write entering, one more from the restore on the way out.
    assert_eq!(attempts.get(), 2);
}
