//! Stopwatch runtime: owns the terminal backend and the session, runs the
//! cooperative polling loop.
//!
//! Single-threaded by design: the loop is the sole reader and mutator of
//! the session, so there is nothing to lock. The only suspension is the
//! bounded idle poll, which also caps input latency.

use std::time::Duration;

use anyhow::Result;

use crate::backend::{Backend, PollResult};
use crate::clock::Clock;
use crate::events::{Action, action_for};
use crate::state::Session;
use crate::update::update;

/// Idle poll timeout: how long one loop iteration waits for a key before
/// treating the pass as an idle tick and redrawing the live row.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

pub struct StopwatchRuntime<B: Backend, C: Clock> {
    backend: B,
    clock: C,
    pub session: Session,
}

impl<B: Backend, C: Clock> StopwatchRuntime<B, C> {
    /// Builds a runtime over an already set-up terminal. Fails with a
    /// [`crate::display::SetupError`] when the terminal cannot fit the
    /// header; nothing is drawn in that case.
    pub fn new(backend: B, clock: C, verbose: bool) -> Result<Self> {
        let geometry = backend.geometry();
        let session = Session::new(clock.now(), geometry, verbose)?;
        Ok(Self {
            backend,
            clock,
            session,
        })
    }

    /// Runs the event loop until the quit action fires.
    pub fn run(&mut self) -> Result<()> {
        while !self.session.should_quit {
            match self.backend.poll_input(IDLE_POLL_DURATION)? {
                PollResult::Input(input) => {
                    if let Some(action) = action_for(input) {
                        update(&mut self.session, action, self.clock.now())?;
                    }
                }
                PollResult::NoInput => {
                    update(&mut self.session, Action::Idle, self.clock.now())?;
                    self.render()?;
                }
            }
        }
        tracing::debug!(laps = self.session.history.lap_count(), "stopwatch quit");
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        let now = self.clock.now();
        let Session {
            history,
            format,
            display,
            ..
        } = &mut self.session;
        display.render(&mut self.backend, history, format, now)
    }

    pub fn verbose(&self) -> bool {
        self.session.format.verbose
    }

    /// The full un-windowed lap table: header, every recorded lap, and the
    /// live row at this instant. Printed on a verbose quit.
    pub fn report(&mut self) -> String {
        let now = self.clock.now();
        let Session {
            history, format, ..
        } = &mut self.session;
        format.note_rollover(history.start(), now);

        let mut lines = format.header_lines();
        for lap in history.laps() {
            lines.push(format.row_text(lap, history.start()));
        }
        lines.push(format.row_text(history.live_lap(now), history.start()));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use crate::backend::KeyInput;
    use crate::backend::testing::FakeBackend;
    use crate::clock::testing::ManualClock;
    use crate::format::DurationStyle;

    use super::*;

    fn runtime(
        backend: FakeBackend,
        clock: &ManualClock,
    ) -> StopwatchRuntime<FakeBackend, &ManualClock> {
        StopwatchRuntime::new(backend, clock, false).unwrap()
    }

    #[test]
    fn quit_terminates_the_loop() {
        let clock = ManualClock::at_noon();
        let mut backend = FakeBackend::with_geometry(6, 80);
        backend.script([KeyInput::Char('q')]);

        let mut runtime = runtime(backend, &clock);
        runtime.run().unwrap();
        assert!(runtime.session.should_quit);
    }

    #[test]
    fn idle_tick_renders_before_any_key() {
        let clock = ManualClock::at_noon();
        let mut backend = FakeBackend::with_geometry(6, 80);
        backend.script_tick();
        backend.script([KeyInput::Char('q')]);

        let mut runtime = runtime(backend, &clock);
        runtime.run().unwrap();
        assert_eq!(runtime.backend.clears, 1);
        assert!(runtime.backend.row_text(0).unwrap().starts_with("Stopwatch:"));
    }

    #[test]
    fn mark_then_undo_round_trips_through_the_loop() {
        let clock = ManualClock::at_noon();
        let mut backend = FakeBackend::with_geometry(6, 80);
        backend.script([KeyInput::Char(' ')]);
        backend.script_tick();
        backend.script([KeyInput::Char('u')]);
        backend.script_tick();
        backend.script([KeyInput::Char('q')]);

        let mut runtime = runtime(backend, &clock);
        runtime.run().unwrap();
        assert_eq!(runtime.session.history.lap_count(), 0);
        // Undo forced a second full redraw
        assert_eq!(runtime.backend.clears, 2);
    }

    #[test]
    fn unbound_keys_change_nothing() {
        let clock = ManualClock::at_noon();
        let mut backend = FakeBackend::with_geometry(6, 80);
        backend.script([KeyInput::Char('x'), KeyInput::Other, KeyInput::Char('q')]);

        let mut runtime = runtime(backend, &clock);
        runtime.run().unwrap();
        assert_eq!(runtime.session.history.lap_count(), 0);
        assert_eq!(runtime.session.format.style, DurationStyle::Seconds);
    }

    #[test]
    fn resize_event_reshapes_the_window() {
        let clock = ManualClock::at_noon();
        let mut backend = FakeBackend::with_geometry(6, 80);
        backend.script([KeyInput::Resize(60, 10), KeyInput::Char('q')]);

        let mut runtime = runtime(backend, &clock);
        runtime.run().unwrap();
        assert_eq!(runtime.session.display.buffer_rows(), 7);
    }

    #[test]
    fn shrinking_below_header_aborts_with_setup_error() {
        let clock = ManualClock::at_noon();
        let mut backend = FakeBackend::with_geometry(6, 80);
        backend.script([KeyInput::Resize(60, 2)]);

        let mut runtime = runtime(backend, &clock);
        let err = runtime.run().unwrap_err();
        assert!(err.downcast_ref::<crate::display::SetupError>().is_some());
    }

    #[test]
    fn verbose_report_lists_every_lap() {
        let clock = ManualClock::at_noon();
        let mut backend = FakeBackend::with_geometry(6, 80);
        backend.script([KeyInput::Char('v')]);
        // Six laps; the 3-row window would only show the tail
        for _ in 0..6 {
            backend.script([KeyInput::Char(' ')]);
        }
        backend.script([KeyInput::Char('q')]);

        let mut runtime = runtime(backend, &clock);
        // Advance the clock between scripted inputs via render ticks
        runtime.run().unwrap();
        assert!(runtime.verbose());

        let report = runtime.report();
        for i in 1..=7 {
            assert!(report.contains(&format!("(#{i})")), "missing lap {i}");
        }
        assert!(report.lines().next().unwrap().starts_with("Stopwatch:"));
    }
}
