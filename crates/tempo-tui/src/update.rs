//! The reducer: the single dispatch switch over [`Action`].
//!
//! All session mutation happens here; the runtime polls input, calls
//! `update`, and renders. Display invalidation policy:
//! - mark: full redraw only once the ring has wrapped
//! - undo: always (rows above the live one change)
//! - format/verbosity change: always (header and column widths change)
//! - resize: always, and may fail fast when the header no longer fits

use chrono::{DateTime, Local};

use crate::backend::Geometry;
use crate::display::SetupError;
use crate::events::Action;
use crate::state::Session;

pub fn update(
    session: &mut Session,
    action: Action,
    now: DateTime<Local>,
) -> Result<(), SetupError> {
    match action {
        Action::Mark => {
            session.history.mark(now);
            if session.history.mark_count() > session.display.buffer_rows() {
                session.display.invalidate();
            }
            tracing::debug!(lap = session.history.lap_count(), "lap marked");
        }
        Action::Undo => {
            if session.history.undo() {
                session.display.invalidate();
                tracing::debug!(laps = session.history.lap_count(), "lap undone");
            }
        }
        Action::NextFormat => {
            session.format.cycle_next();
            session.display.invalidate();
        }
        Action::PrevFormat => {
            session.format.cycle_prev();
            session.display.invalidate();
        }
        Action::ToggleVerbose => {
            session.format.toggle_verbose();
            session.display.invalidate();
        }
        Action::Quit => {
            session.should_quit = true;
        }
        Action::Resize(cols, rows) => {
            session.display.resize(Geometry { rows, cols })?;
        }
        Action::Idle => {}
    }
    Ok(())
}
