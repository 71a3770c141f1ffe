//! Session state owned by the event loop.

use chrono::{DateTime, Local};

use crate::backend::Geometry;
use crate::display::{DisplayBuffer, SetupError};
use crate::format::FormatState;
use crate::history::History;

/// Everything the stopwatch mutates: lap history, formatter state, and the
/// display window. Owned by the runtime and passed by reference into the
/// reducer — no global state.
pub struct Session {
    pub history: History,
    pub format: FormatState,
    pub display: DisplayBuffer,
    pub should_quit: bool,
}

impl Session {
    pub fn new(
        start: DateTime<Local>,
        geometry: Geometry,
        verbose: bool,
    ) -> Result<Self, SetupError> {
        Ok(Self {
            history: History::new(start),
            format: FormatState::new(verbose),
            display: DisplayBuffer::new(geometry)?,
            should_quit: false,
        })
    }
}
