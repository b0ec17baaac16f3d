//! Terminal setup and the event loop.

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::debug;
use std::io;
use std::time::Duration;

use super::{Editor, view};
use crate::runtime::Runtime;

/// Raw mode plus the alternate screen, restored when dropped.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode().context("Failed to enable raw mode")?;
        let guard = TerminalGuard;
        execute!(io::stdout(), EnterAlternateScreen)
            .context("Failed to enter alternate screen")?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Run the editor until the user quits.
pub fn run<R: Runtime>(editor: &mut Editor<R>) -> Result<()> {
    let _guard = TerminalGuard::enter()?;
    let mut stdout = io::stdout();

    while editor.is_running() {
        let (width, height) = terminal::size().context("Failed to read terminal size")?;
        view::draw(&mut stdout, editor, width, height)?;

        match event::read()? {
            Event::Key(key) => editor.handle_key(key),
            Event::Resize(width, height) => debug!("Resized to {}x{}", width, height),
            _ => {}
        }

        // Drain queued input (e.g. a paste) before redrawing
        while editor.is_running() && event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                editor.handle_key(key);
            }
        }
    }
    Ok(())
}
