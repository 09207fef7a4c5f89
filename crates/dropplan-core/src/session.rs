use serde::{Deserialize, Serialize};

use crate::interval::Interval;

/// Structured input for one session column of a plan.
///
/// Use [`Session::new`] for the required fields, then chain the builder-style
/// setters to attach paused and historical ranges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque display name (the column header).
    pub name: String,
    /// Width of every interval allocated to this session.
    pub step: u64,
    /// Last valid position on the track. `0` means the track is empty.
    pub limit: u64,
    /// Ranges that must never be allocated. Unsorted, may overlap.
    #[serde(default)]
    pub paused: Vec<Interval>,
    /// Intervals issued by a previous run, oldest first.
    #[serde(default)]
    pub history: Vec<Interval>,
}

impl Session {
    /// Create a session with no paused or historical ranges.
    pub fn new(name: impl Into<String>, step: u64, limit: u64) -> Self {
        Self {
            name: name.into(),
            step,
            limit,
            paused: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Replace the paused ranges.
    pub fn paused(mut self, paused: Vec<Interval>) -> Self {
        self.paused = paused;
        self
    }

    /// Replace the historical ranges.
    pub fn history(mut self, history: Vec<Interval>) -> Self {
        self.history = history;
        self
    }

    /// Append one paused range.
    pub fn pause(mut self, range: Interval) -> Self {
        self.paused.push(range);
        self
    }

    /// Append one historical range.
    pub fn issued(mut self, range: Interval) -> Self {
        self.history.push(range);
        self
    }

    /// End of the most recently issued historical interval, if any.
    pub fn last_issued_end(&self) -> Option<u64> {
        self.history.last().map(|interval| interval.end)
    }
}
