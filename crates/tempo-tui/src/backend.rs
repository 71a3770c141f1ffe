//! Terminal I/O contract consumed by the stopwatch.
//!
//! The event loop and display buffer talk to the terminal exclusively
//! through [`Backend`], so tests can drive them with an in-memory fake.
//! The crossterm implementation lives in [`crate::terminal`].

use std::time::Duration;

use anyhow::Result;

/// Terminal dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub rows: u16,
    pub cols: u16,
}

/// A decoded input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Char(char),
    Enter,
    CtrlC,
    /// The terminal changed size to (cols, rows).
    Resize(u16, u16),
    /// Any other key; ignored by the keymap.
    Other,
}

/// Tri-state poll outcome: input arrived, or the wait timed out.
/// Errors surface through `Result`, not a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollResult {
    Input(KeyInput),
    NoInput,
}

/// Minimal cell-addressed terminal capability.
pub trait Backend {
    /// Waits up to `timeout` for input. `NoInput` is the idle tick.
    fn poll_input(&mut self, timeout: Duration) -> Result<PollResult>;

    /// Writes `text` starting at (row, col), zero-based. Writes that fall
    /// outside the current bounds are clipped or dropped, never fatal.
    fn write_text(&mut self, row: u16, col: u16, text: &str, emphasis: bool) -> Result<()>;

    /// Clears the whole screen.
    fn clear_all(&mut self) -> Result<()>;

    /// Current terminal size.
    fn geometry(&self) -> Geometry;

    /// Flushes queued writes to the terminal.
    fn flush(&mut self) -> Result<()>;
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;

    use super::*;

    /// One recorded `write_text` call.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Write {
        pub row: u16,
        pub col: u16,
        pub text: String,
        pub emphasis: bool,
    }

    /// In-memory backend: scripted input, recorded output.
    pub struct FakeBackend {
        pub geometry: Geometry,
        pub inputs: VecDeque<PollResult>,
        pub writes: Vec<Write>,
        pub clears: usize,
    }

    impl FakeBackend {
        pub fn with_geometry(rows: u16, cols: u16) -> Self {
            Self {
                geometry: Geometry { rows, cols },
                inputs: VecDeque::new(),
                writes: Vec::new(),
                clears: 0,
            }
        }

        pub fn script(&mut self, inputs: impl IntoIterator<Item = KeyInput>) {
            self.inputs
                .extend(inputs.into_iter().map(PollResult::Input));
        }

        pub fn script_tick(&mut self) {
            self.inputs.push_back(PollResult::NoInput);
        }

        /// Text written to a physical row by the most recent write touching it.
        pub fn row_text(&self, row: u16) -> Option<&str> {
            self.writes
                .iter()
                .rev()
                .find(|w| w.row == row)
                .map(|w| w.text.as_str())
        }
    }

    impl Backend for FakeBackend {
        fn poll_input(&mut self, _timeout: std::time::Duration) -> Result<PollResult> {
            Ok(self.inputs.pop_front().unwrap_or(PollResult::NoInput))
        }

        fn write_text(&mut self, row: u16, col: u16, text: &str, emphasis: bool) -> Result<()> {
            if row >= self.geometry.rows || col >= self.geometry.cols {
                return Ok(());
            }
            let budget = usize::from(self.geometry.cols - col);
            let clipped: String = text.chars().take(budget).collect();
            self.writes.push(Write {
                row,
                col,
                text: clipped,
                emphasis,
            });
            Ok(())
        }

        fn clear_all(&mut self) -> Result<()> {
            self.clears += 1;
            self.writes.clear();
            Ok(())
        }

        fn geometry(&self) -> Geometry {
            self.geometry
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }
    }
}
