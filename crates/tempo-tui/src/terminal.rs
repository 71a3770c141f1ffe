//! Terminal lifecycle management and the crossterm [`Backend`].
//!
//! Terminal state is guaranteed to be restored on:
//! - Normal exit (via Drop)
//! - Panic (via the panic hook)

use std::io::{self, Stdout, Write as _};
use std::panic;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{
    Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use crossterm::{execute, queue};
use unicode_width::UnicodeWidthChar;

use crate::backend::{Backend, Geometry, KeyInput, PollResult};

/// Crossterm-backed terminal: raw mode, alternate screen, hidden cursor.
pub struct CrosstermTerminal {
    out: Stdout,
    /// Last known size as (cols, rows); refreshed on resize events.
    size: (u16, u16),
}

impl CrosstermTerminal {
    /// Sets up the terminal for the stopwatch.
    ///
    /// Call `install_panic_hook()` before this to ensure terminal restore
    /// on panic.
    pub fn setup() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, Hide)
            .context("Failed to enter alternate screen")?;
        let size = crossterm::terminal::size().context("Failed to read terminal size")?;
        Ok(Self { out, size })
    }
}

impl Backend for CrosstermTerminal {
    fn poll_input(&mut self, timeout: Duration) -> Result<PollResult> {
        if !event::poll(timeout).context("Failed to poll terminal events")? {
            return Ok(PollResult::NoInput);
        }
        match event::read().context("Failed to read terminal event")? {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                let input = match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        KeyInput::CtrlC
                    }
                    KeyCode::Char(c) => KeyInput::Char(c),
                    KeyCode::Enter => KeyInput::Enter,
                    _ => KeyInput::Other,
                };
                Ok(PollResult::Input(input))
            }
            Event::Resize(cols, rows) => {
                self.size = (cols, rows);
                Ok(PollResult::Input(KeyInput::Resize(cols, rows)))
            }
            // Key releases, mouse, focus, paste: nothing to dispatch
            _ => Ok(PollResult::NoInput),
        }
    }

    fn write_text(&mut self, row: u16, col: u16, text: &str, emphasis: bool) -> Result<()> {
        let (cols, rows) = self.size;
        if row >= rows || col >= cols {
            // Out-of-bounds writes are dropped so the loop survives
            // transient narrow terminals mid-resize.
            return Ok(());
        }
        let clipped = clip_to_width(text, usize::from(cols - col));
        if clipped.is_empty() {
            return Ok(());
        }
        if emphasis {
            queue!(
                self.out,
                MoveTo(col, row),
                SetAttribute(Attribute::Bold),
                Print(clipped),
                SetAttribute(Attribute::Reset)
            )?;
        } else {
            queue!(self.out, MoveTo(col, row), Print(clipped))?;
        }
        Ok(())
    }

    fn clear_all(&mut self) -> Result<()> {
        queue!(self.out, Clear(ClearType::All))?;
        Ok(())
    }

    fn geometry(&self) -> Geometry {
        Geometry {
            rows: self.size.1,
            cols: self.size.0,
        }
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush().context("Failed to flush terminal output")
    }
}

impl Drop for CrosstermTerminal {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

/// Clips text to the given display width (columns, not chars).
fn clip_to_width(text: &str, budget: usize) -> &str {
    let mut width = 0;
    let mut end = 0;
    for (idx, ch) in text.char_indices() {
        let w = ch.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        end = idx + ch.len_utf8();
    }
    &text[..end]
}

/// Restores terminal state: shows the cursor, leaves the alternate screen,
/// and disables raw mode.
///
/// This function is idempotent and safe to call multiple times.
pub fn restore_terminal() -> Result<()> {
    execute!(io::stdout(), Show, LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    disable_raw_mode().context("Failed to disable raw mode")?;
    Ok(())
}

/// Installs a panic hook that restores the terminal before printing the
/// panic.
///
/// Call this BEFORE `CrosstermTerminal::setup()`.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}
