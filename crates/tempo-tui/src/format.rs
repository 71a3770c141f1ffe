//! Display formatting: duration styles, row composition, and header text.
//!
//! Durations are right-justified into a fixed 13-column field in every
//! style, so switching styles mid-session never shifts column alignment —
//! only content and header labels change.

use chrono::{DateTime, Local, TimeDelta};

use crate::history::Lap;

/// Width of the lap and total duration columns.
pub const DURATION_WIDTH: usize = 13;

/// Number of header lines above the lap rows.
pub const HEADER_ROWS: u16 = 3;

/// How a duration is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationStyle {
    /// Decimal seconds, e.g. "90.5"
    Seconds,
    /// "MM:SS"
    MinutesSeconds,
    /// "HH:MM:SS"
    HoursMinutesSeconds,
    /// "HH:MM:SS" durations plus a start-end clock-time pair per row
    ClockRange,
}

impl DurationStyle {
    pub const ALL: [DurationStyle; 4] = [
        DurationStyle::Seconds,
        DurationStyle::MinutesSeconds,
        DurationStyle::HoursMinutesSeconds,
        DurationStyle::ClockRange,
    ];

    fn position(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).expect("style in ALL")
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Long styles widen the clock-time column to a start-end pair.
    pub fn is_long(self) -> bool {
        matches!(self, DurationStyle::ClockRange)
    }

    /// Unit label shown in the column header.
    fn unit(self) -> &'static str {
        match self {
            DurationStyle::Seconds => "s",
            DurationStyle::MinutesSeconds => "m:s",
            DurationStyle::HoursMinutesSeconds | DurationStyle::ClockRange => "h:m:s",
        }
    }
}

/// Formatter state: the active style, the verbose flag, and the sticky
/// day-rollover flag. Rendering itself is pure.
#[derive(Debug, Clone)]
pub struct FormatState {
    pub style: DurationStyle,
    pub verbose: bool,
    rollover: bool,
}

impl FormatState {
    pub fn new(verbose: bool) -> Self {
        Self {
            style: DurationStyle::Seconds,
            verbose,
            rollover: false,
        }
    }

    pub fn cycle_next(&mut self) {
        self.style = self.style.next();
    }

    pub fn cycle_prev(&mut self) {
        self.style = self.style.prev();
    }

    pub fn toggle_verbose(&mut self) {
        self.verbose = !self.verbose;
    }

    /// Latches the day-rollover flag once the live tail's calendar date
    /// differs from the start mark's. Returns true on the transition, which
    /// callers treat as a structural display change.
    pub fn note_rollover(&mut self, start: DateTime<Local>, now: DateTime<Local>) -> bool {
        if !self.rollover && now.date_naive() != start.date_naive() {
            self.rollover = true;
            return true;
        }
        false
    }

    pub fn rollover(&self) -> bool {
        self.rollover
    }

    /// A duration in the active style, right-justified to the fixed column.
    pub fn duration_text(&self, duration: TimeDelta) -> String {
        let duration = duration.max(TimeDelta::zero());
        let secs = duration.num_seconds();
        let body = match self.style {
            DurationStyle::Seconds => {
                format!("{:.1}", duration.num_milliseconds() as f64 / 1000.0)
            }
            DurationStyle::MinutesSeconds => format!("{:02}:{:02}", secs / 60, secs % 60),
            DurationStyle::HoursMinutesSeconds | DurationStyle::ClockRange => {
                format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
            }
        };
        format!("{body:>width$}", width = DURATION_WIDTH)
    }

    /// A clock time, date-prefixed once the session has crossed midnight.
    pub fn time_text(&self, t: DateTime<Local>) -> String {
        if self.rollover {
            t.format("%d-%b %H:%M:%S").to_string()
        } else {
            t.format("%H:%M:%S").to_string()
        }
    }

    /// One lap row: clock time (or start-end pair), lap duration, index,
    /// and running total since the start mark.
    pub fn row_text(&self, lap: Lap, start: DateTime<Local>) -> String {
        let clock = if self.style.is_long() {
            format!("{}-{}", self.time_text(lap.prev), self.time_text(lap.curr))
        } else {
            self.time_text(lap.curr)
        };
        let lap_duration = self.duration_text(lap.curr - lap.prev);
        let total = self.duration_text(lap.curr - start);
        format!("{clock}   {lap_duration} (#{})   {total}", lap.index)
    }

    /// Header lines: legend, spacer, and column labels. Regenerated whenever
    /// the style or verbosity changes.
    pub fn header_lines(&self) -> Vec<String> {
        let mut legend =
            String::from("Stopwatch: q quit, space lap, u undo, /? format, v verbose");
        if self.verbose {
            legend.push_str(" [verbose]");
        }
        let time_label = if self.style.is_long() { "Start-End" } else { "Time" };
        let unit = self.style.unit();
        let columns = format!(
            "{time_label:<cw$}   {:>dw$} (#)   {:>dw$}",
            format!("lap [{unit}]"),
            format!("total [{unit}]"),
            cw = self.clock_width(),
            dw = DURATION_WIDTH,
        );
        vec![legend, String::new(), columns]
    }

    /// Width of the clock-time column for the current style and rollover
    /// state.
    fn clock_width(&self) -> usize {
        let single = if self.rollover { 15 } else { 8 };
        if self.style.is_long() {
            single * 2 + 1
        } else {
            single
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 14, h, m, s).unwrap()
    }

    fn lap(index: usize, prev: DateTime<Local>, curr: DateTime<Local>) -> Lap {
        Lap { index, prev, curr }
    }

    #[test]
    fn cycling_all_styles_returns_to_start() {
        let n = DurationStyle::ALL.len();
        let mut style = DurationStyle::Seconds;
        for _ in 0..n {
            style = style.next();
        }
        assert_eq!(style, DurationStyle::Seconds);

        for _ in 0..n {
            style = style.prev();
        }
        assert_eq!(style, DurationStyle::Seconds);
    }

    #[test]
    fn prev_undoes_next() {
        for style in DurationStyle::ALL {
            assert_eq!(style.next().prev(), style);
        }
    }

    #[test]
    fn durations_fill_fixed_width_in_every_style() {
        for style in DurationStyle::ALL {
            let mut format = FormatState::new(false);
            format.style = style;
            let text = format.duration_text(TimeDelta::milliseconds(1500));
            assert_eq!(text.chars().count(), DURATION_WIDTH, "style {style:?}");
        }
    }

    #[test]
    fn seconds_style_shows_tenths() {
        let format = FormatState::new(false);
        assert_eq!(format.duration_text(TimeDelta::milliseconds(1500)).trim(), "1.5");
    }

    #[test]
    fn minutes_seconds_style_truncates() {
        let mut format = FormatState::new(false);
        format.style = DurationStyle::MinutesSeconds;
        // 1.5s renders as a whole second
        assert_eq!(format.duration_text(TimeDelta::milliseconds(1500)).trim(), "00:01");
        assert_eq!(format.duration_text(TimeDelta::seconds(61)).trim(), "01:01");
    }

    #[test]
    fn hours_style_spans_long_sessions() {
        let mut format = FormatState::new(false);
        format.style = DurationStyle::HoursMinutesSeconds;
        assert_eq!(format.duration_text(TimeDelta::seconds(3661)).trim(), "01:01:01");
    }

    #[test]
    fn negative_durations_clamp_to_zero() {
        let format = FormatState::new(false);
        assert_eq!(format.duration_text(TimeDelta::seconds(-5)).trim(), "0.0");
    }

    #[test]
    fn row_contains_index_lap_and_total() {
        let format = FormatState::new(false);
        let row = format.row_text(lap(1, at(12, 0, 0), at(12, 0, 1)), at(12, 0, 0));
        assert!(row.starts_with("12:00:01"));
        assert!(row.contains("(#1)"));
        assert!(row.contains("1.0"));
    }

    #[test]
    fn range_style_shows_start_end_pair() {
        let mut format = FormatState::new(false);
        format.style = DurationStyle::ClockRange;
        let row = format.row_text(lap(2, at(12, 0, 1), at(12, 0, 3)), at(12, 0, 0));
        assert!(row.starts_with("12:00:01-12:00:03"));
        assert!(row.contains("00:00:02"));
        // total since start
        assert!(row.contains("00:00:03"));
    }

    #[test]
    fn style_switch_keeps_total_column_aligned() {
        let mut format = FormatState::new(false);
        let short = format.row_text(lap(1, at(12, 0, 0), at(12, 0, 1)), at(12, 0, 0));
        format.cycle_next();
        let after = format.row_text(lap(1, at(12, 0, 0), at(12, 0, 1)), at(12, 0, 0));
        // Clock-time column width is identical across the short styles
        assert_eq!(
            short.find("(#1)").unwrap(),
            after.find("(#1)").unwrap()
        );
    }

    #[test]
    fn rollover_latches_and_prefixes_dates() {
        let mut format = FormatState::new(false);
        let start = at(23, 0, 0);

        assert!(!format.note_rollover(start, at(23, 30, 0)));
        assert!(!format.rollover());

        let next_day = Local.with_ymd_and_hms(2026, 3, 15, 0, 10, 0).unwrap();
        assert!(format.note_rollover(start, next_day));
        // Only the transition reports true
        assert!(!format.note_rollover(start, next_day));

        assert_eq!(format.time_text(next_day), "15-Mar 00:10:00");
        // All rows get the prefix once triggered, including pre-midnight ones
        assert_eq!(format.time_text(start), "14-Mar 23:00:00");
    }

    #[test]
    fn header_reflects_style_and_verbosity() {
        let mut format = FormatState::new(false);
        let header = format.header_lines();
        assert_eq!(header.len() as u16, HEADER_ROWS);
        assert!(header[2].contains("lap [s]"));

        format.cycle_next();
        assert!(format.header_lines()[2].contains("lap [m:s]"));

        format.toggle_verbose();
        assert!(format.header_lines()[0].contains("[verbose]"));

        format.style = DurationStyle::ClockRange;
        assert!(format.header_lines()[2].starts_with("Start-End"));
    }
}
