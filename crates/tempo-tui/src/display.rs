//! Display buffer management: mapping the lap history onto a fixed window
//! of terminal rows.
//!
//! Lap index `i` (1-based) renders at physical row
//! `HEADER_ROWS + (i % buffer_rows)` — a ring over the usable rows, so once
//! laps outnumber rows, new laps overwrite the oldest from the top and the
//! window always ends in the live row.

use anyhow::Result;
use chrono::{DateTime, Local};

use crate::backend::{Backend, Geometry};
use crate::format::{FormatState, HEADER_ROWS};
use crate::history::{History, Lap};

/// The terminal cannot fit the header plus one lap row.
#[derive(Debug, Clone, Copy)]
pub struct SetupError {
    pub rows: u16,
    pub cols: u16,
}

impl std::fmt::Display for SetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "terminal too small: {} rows x {} cols (need at least {} rows)",
            self.rows,
            self.cols,
            HEADER_ROWS + 1
        )
    }
}

impl std::error::Error for SetupError {}

/// Maps history rows to physical rows and tracks what is already drawn.
#[derive(Debug)]
pub struct DisplayBuffer {
    geometry: Geometry,
    buffer_rows: usize,
    pending_clear: bool,
    drawn_laps: usize,
}

impl DisplayBuffer {
    pub fn new(geometry: Geometry) -> Result<Self, SetupError> {
        let buffer_rows = usable_rows(geometry)?;
        Ok(Self {
            geometry,
            buffer_rows,
            pending_clear: true,
            drawn_laps: 0,
        })
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Rows available for lap display below the header.
    pub fn buffer_rows(&self) -> usize {
        self.buffer_rows
    }

    /// Schedules a full clear-and-redraw for the next render.
    pub fn invalidate(&mut self) {
        self.pending_clear = true;
    }

    /// Re-reads geometry after a resize. Fails fast when the new size
    /// cannot fit the header.
    pub fn resize(&mut self, geometry: Geometry) -> Result<(), SetupError> {
        self.buffer_rows = usable_rows(geometry)?;
        self.geometry = geometry;
        self.pending_clear = true;
        Ok(())
    }

    /// Physical row for a 1-based lap index.
    pub fn row_for(&self, lap_index: usize) -> u16 {
        HEADER_ROWS + (lap_index % self.buffer_rows) as u16
    }

    /// Draws the current state of the history into the window.
    ///
    /// With a pending clear: full clear, header, and every visible row.
    /// Otherwise only changed rows are written — newly recorded laps once,
    /// and the live row (emphasized) every call.
    pub fn render<B: Backend>(
        &mut self,
        backend: &mut B,
        history: &History,
        format: &mut FormatState,
        now: DateTime<Local>,
    ) -> Result<()> {
        // Crossing midnight adds a date prefix to every clock time; that is
        // a structural change, so force a full redraw on the transition.
        if format.note_rollover(history.start(), now) {
            self.pending_clear = true;
        }

        let start = history.start();

        if self.pending_clear {
            backend.clear_all()?;
            for (row, line) in format.header_lines().iter().enumerate() {
                backend.write_text(row as u16, 0, line, false)?;
            }
            for lap in self.visible_laps(history) {
                backend.write_text(self.row_for(lap.index), 0, &format.row_text(lap, start), false)?;
            }
            self.drawn_laps = history.lap_count();
            self.pending_clear = false;
        } else if history.lap_count() > self.drawn_laps {
            let drawn = self.drawn_laps;
            for lap in self.visible_laps(history).filter(|lap| lap.index > drawn) {
                backend.write_text(self.row_for(lap.index), 0, &format.row_text(lap, start), false)?;
            }
            self.drawn_laps = history.lap_count();
        }

        let live = history.live_lap(now);
        backend.write_text(self.row_for(live.index), 0, &format.row_text(live, start), true)?;
        backend.flush()
    }

    /// Recorded laps inside the visible window: the most recent
    /// `buffer_rows` rows, the last of which is the live row.
    fn visible_laps<'a>(&self, history: &'a History) -> impl Iterator<Item = Lap> + 'a {
        let first_visible = history.mark_count().saturating_sub(self.buffer_rows) + 1;
        history.laps().filter(move |lap| lap.index >= first_visible)
    }
}

fn usable_rows(geometry: Geometry) -> Result<usize, SetupError> {
    let usable = i32::from(geometry.rows) - i32::from(HEADER_ROWS);
    if usable < 1 {
        return Err(SetupError {
            rows: geometry.rows,
            cols: geometry.cols,
        });
    }
    Ok(usable as usize)
}
