//! Closed integer ranges on a session track and the predicates over them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A closed range `[start, end]` of track positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Interval {
    pub start: u64,
    pub end: u64,
}

impl Interval {
    /// Build an interval, returning `None` when `start > end`.
    pub fn new(start: u64, end: u64) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// A single-position interval `[at, at]`.
    pub fn point(at: u64) -> Self {
        Self { start: at, end: at }
    }

    /// Number of positions covered.
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    pub fn contains(&self, position: u64) -> bool {
        self.start <= position && position <= self.end
    }

    /// Closed-interval overlap test.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// True when `other` lies entirely inside `self`.
    pub fn covers(&self, other: &Interval) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for Interval {
    type Err = IntervalParseError;

    /// Parses `"start-end"`. Whitespace around either bound is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once('-')
            .ok_or_else(|| IntervalParseError(s.to_owned()))?;
        let start: u64 = start
            .trim()
            .parse()
            .map_err(|_| IntervalParseError(s.to_owned()))?;
        let end: u64 = end
            .trim()
            .parse()
            .map_err(|_| IntervalParseError(s.to_owned()))?;
        Interval::new(start, end).ok_or_else(|| IntervalParseError(s.to_owned()))
    }
}

/// Error returned when parsing an invalid [`Interval`] string.
#[derive(Debug, Clone)]
pub struct IntervalParseError(pub String);

impl fmt::Display for IntervalParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid interval: {:?}", self.0)
    }
}

impl std::error::Error for IntervalParseError {}

/// True iff `candidate` intersects any of `ranges`.
pub fn overlaps_any(candidate: &Interval, ranges: &[Interval]) -> bool {
    ranges.iter().any(|range| range.overlaps(candidate))
}

/// True iff some single range in `ranges` fully contains `candidate`.
///
/// Partial overlap does not count.
pub fn covered_by_any(candidate: &Interval, ranges: &[Interval]) -> bool {
    ranges.iter().any(|range| range.covers(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(start: u64, end: u64) -> Interval {
        Interval::new(start, end).unwrap()
    }

    #[test]
    fn new_rejects_inverted_bounds() {
        assert!(Interval::new(5, 4).is_none());
        assert_eq!(Interval::new(4, 4), Some(Interval::point(4)));
    }

    #[test]
    fn overlap_is_closed_on_both_ends() {
        assert!(iv(1, 3).overlaps(&iv(3, 5)));
        assert!(iv(3, 5).overlaps(&iv(1, 3)));
        assert!(!iv(1, 3).overlaps(&iv(4, 6)));
        assert!(iv(1, 10).overlaps(&iv(4, 6)));
    }

    #[test]
    fn overlaps_any_checks_every_range() {
        let ranges = [iv(20, 30), iv(1, 2)];
        assert!(overlaps_any(&iv(2, 4), &ranges));
        assert!(overlaps_any(&iv(25, 40), &ranges));
        assert!(!overlaps_any(&iv(3, 19), &ranges));
        assert!(!overlaps_any(&iv(3, 19), &[]));
    }

    #[test]
    fn covered_by_any_requires_single_containing_range() {
        // [1,5] and [6,10] together span [4,7] but neither contains it.
        let history = [iv(1, 5), iv(6, 10)];
        assert!(!covered_by_any(&iv(4, 7), &history));
        assert!(covered_by_any(&iv(6, 10), &history));
        assert!(covered_by_any(&iv(2, 3), &history));
        assert!(!covered_by_any(&iv(10, 11), &history));
    }

    #[test]
    fn display_and_parse_agree() {
        let parsed: Interval = "12-15".parse().unwrap();
        assert_eq!(parsed, iv(12, 15));
        assert_eq!(parsed.to_string(), "12-15");
        assert_eq!(parsed.len(), 4);
        assert_eq!(" 3 - 7".parse::<Interval>().unwrap(), iv(3, 7));
    }

    #[test]
    fn parse_rejects_malformed_text() {
        for bad in ["", "7", "a-b", "5-3", "-3", "X", "Limite"] {
            assert!(bad.parse::<Interval>().is_err(), "{bad:?} should not parse");
        }
    }
}
