//! Lap history: the ordered sequence of recorded instants.
//!
//! `marks[0]` is the session start and is never removed, so the live lap
//! always has a valid previous instant. Marks are non-decreasing; a
//! wall-clock step backwards is clamped to the latest mark.

use chrono::{DateTime, Local};

/// One lap, derived from two consecutive marks (or the last mark and "now"
/// for the live lap). `index` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lap {
    pub index: usize,
    pub prev: DateTime<Local>,
    pub curr: DateTime<Local>,
}

/// Append/pop-only sequence of lap marks.
#[derive(Debug, Clone)]
pub struct History {
    marks: Vec<DateTime<Local>>,
}

impl History {
    pub fn new(start: DateTime<Local>) -> Self {
        Self { marks: vec![start] }
    }

    pub fn start(&self) -> DateTime<Local> {
        self.marks[0]
    }

    pub fn last(&self) -> DateTime<Local> {
        *self.marks.last().expect("start mark always present")
    }

    /// Number of marks, including the start mark. Equals the number of
    /// display rows: recorded laps plus the live row.
    pub fn mark_count(&self) -> usize {
        self.marks.len()
    }

    /// Number of recorded laps.
    pub fn lap_count(&self) -> usize {
        self.marks.len() - 1
    }

    /// 1-based index of the live (not yet recorded) lap.
    pub fn live_index(&self) -> usize {
        self.marks.len()
    }

    /// Records a lap boundary. Always succeeds.
    pub fn mark(&mut self, now: DateTime<Local>) {
        self.marks.push(now.max(self.last()));
    }

    /// Removes the most recent mark. Returns whether a removal occurred;
    /// the start mark is never removed.
    pub fn undo(&mut self) -> bool {
        if self.marks.len() > 1 {
            self.marks.pop();
            true
        } else {
            false
        }
    }

    /// Lap triples for all recorded transitions, excluding the live tail.
    pub fn laps(&self) -> impl Iterator<Item = Lap> + '_ {
        self.marks.windows(2).enumerate().map(|(i, pair)| Lap {
            index: i + 1,
            prev: pair[0],
            curr: pair[1],
        })
    }

    /// The not-yet-recorded tail lap at the given instant.
    pub fn live_lap(&self, now: DateTime<Local>) -> Lap {
        let prev = self.last();
        Lap {
            index: self.live_index(),
            prev,
            curr: now.max(prev),
        }
    }
}
