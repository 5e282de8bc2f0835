use std::io::{self, Write};

use crossterm::cursor::Show;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};

/// Puts the terminal into UI mode and restores it on drop, including when
/// setup fails halfway.
pub struct TerminalGuard<W: Write> {
    out: W,
    raw: bool,
}

impl<W: Write> TerminalGuard<W> {
    /// Switch to the alternate screen with mouse capture, and to raw mode
    /// when `raw` is set.
    pub fn enter(out: W, raw: bool) -> io::Result<Self> {
        if raw {
            enable_raw_mode()?;
        }
        let mut guard = Self { out, raw };
        execute!(guard.out, EnterAlternateScreen, EnableMouseCapture)?;
        Ok(guard)
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if self.raw {
            let _ = disable_raw_mode();
        }
        let _ = execute!(self.out, LeaveAlternateScreen, DisableMouseCapture, Show);
    }
}
