//! Cursor arithmetic for a single session track.
//!
//! A [`Track`] borrows one [`Session`], keeps its paused ranges sorted by
//! start, and answers the three questions the driver asks: where does the
//! session start, where can the cursor legally land, and what token does the
//! next allocation produce.

use tracing::{debug, warn};

use crate::error::PlanFault;
use crate::interval::{Interval, covered_by_any, overlaps_any};
use crate::session::Session;
use crate::token::Token;

/// The outcome of one allocation: the emitted token and the cursor to use
/// for the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
    pub token: Token,
    pub next: u64,
}

/// Read-only view of one session's track.
#[derive(Debug)]
pub struct Track<'a> {
    index: usize,
    session: &'a Session,
    /// Paused ranges ordered by start.
    paused: Vec<Interval>,
}

impl<'a> Track<'a> {
    /// Build the view for the session at `index`.
    ///
    /// Returns [`PlanFault::ZeroStep`] for a session whose step is zero.
    pub fn new(index: usize, session: &'a Session) -> Result<Self, PlanFault> {
        if session.step == 0 {
            return Err(PlanFault::ZeroStep {
                index,
                name: session.name.clone(),
            });
        }

        let mut paused = session.paused.clone();
        paused.sort_by_key(|range| range.start);

        Ok(Self {
            index,
            session,
            paused,
        })
    }

    /// True iff `candidate` touches any paused range.
    pub fn is_paused(&self, candidate: &Interval) -> bool {
        overlaps_any(candidate, &self.paused)
    }

    /// True iff `candidate` lies entirely inside one historical interval.
    pub fn is_fully_historical(&self, candidate: &Interval) -> bool {
        covered_by_any(candidate, &self.session.history)
    }

    /// Move `start` to the first position at or after it (cyclically) that
    /// no paused range contains.
    ///
    /// Positions outside `[1, limit]` wrap to `1`. An empty track parks the
    /// cursor at `1`. The candidate only moves forward between wraps, so
    /// needing a second wrap means the paused ranges cover the whole track,
    /// which is reported as [`PlanFault::TrackExhausted`].
    pub fn next_valid_start(&self, start: u64) -> Result<u64, PlanFault> {
        let limit = self.session.limit;
        if limit == 0 {
            return Ok(1);
        }

        let mut candidate = if (1..=limit).contains(&start) { start } else { 1 };
        let mut lapped = candidate == 1;

        loop {
            let Some(range) = self.paused.iter().find(|range| range.contains(candidate)) else {
                return Ok(candidate);
            };

            match range.end.checked_add(1).filter(|next| *next <= limit) {
                Some(next) => candidate = next,
                None if lapped => {
                    warn!(
                        session = self.index,
                        name = %self.session.name,
                        limit,
                        "paused ranges cover the whole track"
                    );
                    return Err(PlanFault::TrackExhausted {
                        index: self.index,
                        name: self.session.name.clone(),
                        limit,
                    });
                }
                None => {
                    candidate = 1;
                    lapped = true;
                }
            }
        }
    }

    /// Cursor for the first drop of a new pass, continuing after the last
    /// historical interval. Always a valid start.
    pub fn initial_cursor(&self) -> Result<u64, PlanFault> {
        match self.session.last_issued_end() {
            None => self.next_valid_start(1),
            Some(end) if end >= self.session.limit => self.next_valid_start(1),
            Some(end) => self.next_valid_start(end + 1),
        }
    }

    /// Allocate one interval starting at or after `cursor`.
    ///
    /// Checks run in a fixed order: limit overflow, paused overlap, full
    /// historical containment, success. The first match decides the token.
    pub fn allocate(&self, cursor: u64) -> Result<Allocation, PlanFault> {
        let limit = self.session.limit;
        let start = self.next_valid_start(cursor)?;
        let end = start.checked_add(self.session.step - 1);

        let (token, resume) = match end {
            Some(end) if end <= limit => {
                let proposed = Interval { start, end };
                // Past u64::MAX is "past the limit" and wraps like any other overflow.
                let after = end.checked_add(1).unwrap_or(1);
                if self.is_paused(&proposed) {
                    (Token::Paused, after)
                } else if self.is_fully_historical(&proposed) {
                    (Token::Reused, after)
                } else {
                    (Token::Interval(proposed), after)
                }
            }
            _ => (Token::Limit, 1),
        };

        let next = self.next_valid_start(resume)?;
        debug!(
            session = self.index,
            cursor,
            start,
            token = %token,
            next,
            "allocated"
        );
        Ok(Allocation { token, next })
    }
}
