//! Full-screen stopwatch TUI for tempo.
//!
//! Marks laps with a keystroke, scrolls them through a ring of terminal
//! rows, and keeps a live elapsed row updating at the bottom of the window.

pub mod backend;
pub mod clock;
pub mod display;
pub mod events;
pub mod format;
pub mod history;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use anyhow::Result;
pub use backend::{Backend, Geometry, KeyInput, PollResult};
pub use clock::{Clock, SystemClock};
pub use display::SetupError;
pub use runtime::StopwatchRuntime;

/// Runs the interactive stopwatch on the real terminal.
///
/// Returns the full lap table when the session ends in verbose mode, for
/// the caller to print after the terminal is restored. A terminal too
/// small for the header surfaces as [`SetupError`] before anything is
/// drawn.
pub fn run_stopwatch(verbose: bool) -> Result<Option<String>> {
    terminal::install_panic_hook();
    let backend = terminal::CrosstermTerminal::setup()?;

    // Backend drop restores the terminal on every path below.
    let mut runtime = StopwatchRuntime::new(backend, SystemClock, verbose)?;
    runtime.run()?;

    let report = runtime.verbose().then(|| runtime.report());
    drop(runtime);
    Ok(report)
}
