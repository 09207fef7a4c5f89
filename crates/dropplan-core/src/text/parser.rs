//! Tab-delimited plan description parser.
//!
//! The description is the previous plan as pasted by the operator:
//!
//! ```text
//! steps            (one positive integer per session)
//! session names
//! history rows     (zero or more, one token per session)
//! limits           (one integer per session)
//! paused rows      (zero or more: `a-b`, `v`, or `x` per session)
//! ```
//!
//! The limits line is found by searching bottom-up for the last line with
//! exactly one integer per session; everything between the names and the
//! limits is history, everything after is paused ranges.

use thiserror::Error;
use tracing::debug;

use crate::interval::Interval;
use crate::session::Session;

/// Errors that can occur while parsing a plan description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanTextError {
    #[error(
        "plan must have at least 4 lines (steps, sessions, limits, paused or history), found {0}"
    )]
    TooFewLines(usize),

    #[error("invalid step {value:?} in column {column} (expected a positive integer)")]
    InvalidStep { column: usize, value: String },

    #[error("steps count ({steps}) doesn't match sessions count ({sessions})")]
    SessionCountMismatch { steps: usize, sessions: usize },

    #[error("could not find a limits line with {0} integer fields")]
    MissingLimits(usize),

    #[error("invalid paused interval {value:?} on line {line}, column {column}")]
    InvalidPausedRange {
        line: usize,
        column: usize,
        value: String,
    },

    #[error("paused interval {value:?} on line {line}, column {column} has start > end")]
    InvertedPausedRange {
        line: usize,
        column: usize,
        value: String,
    },
}

/// A parsed plan description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanText {
    pub sessions: Vec<Session>,
}

impl PlanText {
    pub fn session_names(&self) -> impl Iterator<Item = &str> {
        self.sessions.iter().map(|s| s.name.as_str())
    }
}

/// A non-blank input line with its 1-based line number.
struct Line<'a> {
    number: usize,
    text: &'a str,
}

impl<'a> Line<'a> {
    fn fields(&self) -> Vec<&'a str> {
        self.text.split('\t').collect()
    }
}

/// Parse a tab-delimited plan description into sessions.
pub fn parse_plan_text(content: &str) -> Result<PlanText, PlanTextError> {
    // Trailing whitespace (tabs included) is noise from copy/paste. Leading
    // tabs are kept since they mark empty columns.
    let lines: Vec<Line<'_>> = content
        .lines()
        .enumerate()
        .map(|(i, raw)| Line {
            number: i + 1,
            text: raw.trim_end().trim_start_matches(' '),
        })
        .filter(|line| !line.text.is_empty())
        .collect();

    if lines.len() < 4 {
        return Err(PlanTextError::TooFewLines(lines.len()));
    }

    let steps = parse_steps(&lines[0])?;
    let names: Vec<String> = lines[1]
        .fields()
        .into_iter()
        .map(|name| name.trim().to_owned())
        .collect();

    if steps.len() != names.len() {
        return Err(PlanTextError::SessionCountMismatch {
            steps: steps.len(),
            sessions: names.len(),
        });
    }
    let width = names.len();

    let (limits_idx, limits) = find_limits(&lines, width)?;

    let mut history: Vec<Vec<Interval>> = vec![Vec::new(); width];
    for line in &lines[2..limits_idx] {
        collect_history(line, width, &mut history);
    }

    let mut paused: Vec<Vec<Interval>> = vec![Vec::new(); width];
    for line in &lines[limits_idx + 1..] {
        collect_paused(line, width, &mut paused)?;
    }

    let sessions = names
        .into_iter()
        .zip(steps)
        .zip(limits)
        .zip(history.into_iter().zip(paused))
        .map(|(((name, step), limit), (history, paused))| {
            Session::new(name, step, limit).history(history).paused(paused)
        })
        .collect();

    Ok(PlanText { sessions })
}

fn parse_steps(line: &Line<'_>) -> Result<Vec<u64>, PlanTextError> {
    line.fields()
        .into_iter()
        .enumerate()
        .map(|(i, field)| {
            field
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|step| *step > 0)
                .ok_or_else(|| PlanTextError::InvalidStep {
                    column: i + 1,
                    value: field.to_owned(),
                })
        })
        .collect()
}

/// Search bottom-up (never into the steps or names lines) for the last line
/// holding exactly `width` integers.
fn find_limits(lines: &[Line<'_>], width: usize) -> Result<(usize, Vec<u64>), PlanTextError> {
    (2..lines.len())
        .rev()
        .find_map(|idx| {
            let fields = lines[idx].fields();
            if fields.len() != width {
                return None;
            }
            let limits = fields
                .iter()
                .map(|field| field.trim().parse::<u64>().ok())
                .collect::<Option<Vec<_>>>()?;
            Some((idx, limits))
        })
        .ok_or(PlanTextError::MissingLimits(width))
}

/// Record every `a-b` field of a history row. Sentinels and junk are skipped,
/// as are rows whose width does not match the session count.
fn collect_history(line: &Line<'_>, width: usize, history: &mut [Vec<Interval>]) {
    let fields = line.fields();
    if fields.len() != width {
        debug!(line = line.number, fields = fields.len(), width, "skipping history row");
        return;
    }

    for (column, field) in fields.into_iter().enumerate() {
        if !field.contains('-') {
            continue;
        }
        match field.parse::<Interval>() {
            Ok(interval) => history[column].push(interval),
            Err(e) => debug!(line = line.number, column = column + 1, error = %e, "ignoring history field"),
        }
    }
}

/// Record the paused ranges of one row. Short rows are padded with `x`.
fn collect_paused(
    line: &Line<'_>,
    width: usize,
    paused: &mut [Vec<Interval>],
) -> Result<(), PlanTextError> {
    let fields = line.fields();

    for (column, ranges) in paused.iter_mut().enumerate().take(width) {
        let raw = fields.get(column).map(|f| f.trim()).unwrap_or("x");
        if raw.is_empty() || raw.eq_ignore_ascii_case("x") {
            continue;
        }

        let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        let invalid = || PlanTextError::InvalidPausedRange {
            line: line.number,
            column: column + 1,
            value: raw.to_owned(),
        };

        let range = match compact.split_once('-') {
            Some((start, end)) => {
                let start: u64 = start.parse().map_err(|_| invalid())?;
                let end: u64 = end.parse().map_err(|_| invalid())?;
                Interval::new(start, end).ok_or_else(|| PlanTextError::InvertedPausedRange {
                    line: line.number,
                    column: column + 1,
                    value: raw.to_owned(),
                })?
            }
            None => Interval::point(compact.parse().map_err(|_| invalid())?),
        };
        ranges.push(range);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(start: u64, end: u64) -> Interval {
        Interval::new(start, end).unwrap()
    }

    const SAMPLE: &str = "2\t3\t5
Alpha\tBeta\tGamma
1-2\t1-3\t1-5
3-4\tLimite\tX
20\t12\t40
5-6\tx\t7
x\t\t10 - 12
";

    #[test]
    fn parses_full_description() {
        let plan = parse_plan_text(SAMPLE).expect("should parse");
        let names: Vec<_> = plan.session_names().collect();
        assert_eq!(names, ["Alpha", "Beta", "Gamma"]);

        let alpha = &plan.sessions[0];
        assert_eq!((alpha.step, alpha.limit), (2, 20));
        assert_eq!(alpha.history, [iv(1, 2), iv(3, 4)]);
        assert_eq!(alpha.paused, [iv(5, 6)]);

        let beta = &plan.sessions[1];
        assert_eq!(beta.history, [iv(1, 3)]);
        assert!(beta.paused.is_empty());

        let gamma = &plan.sessions[2];
        assert_eq!((gamma.step, gamma.limit), (5, 40));
        assert_eq!(gamma.history, [iv(1, 5)]);
        assert_eq!(gamma.paused, [iv(7, 7), iv(10, 12)]);
    }

    #[test]
    fn accepts_description_without_history_or_paused_rows() {
        let plan = parse_plan_text("1\t1\nA\tB\n\n10\t0\n\n7\t8\n").unwrap();
        // The bottom-most integer row wins as limits; the row above it is a
        // history row with no ranges.
        assert_eq!(plan.sessions[0].limit, 7);
        assert_eq!(plan.sessions[1].limit, 8);
        assert!(plan.sessions.iter().all(|s| s.history.is_empty()));
    }

    #[test]
    fn limit_line_may_be_followed_by_paused_rows() {
        let plan = parse_plan_text("1\nA\n2-3\n10\n4-5\n").unwrap();
        let session = &plan.sessions[0];
        assert_eq!(session.limit, 10);
        assert_eq!(session.history, [iv(2, 3)]);
        assert_eq!(session.paused, [iv(4, 5)]);
    }

    #[test]
    fn rejects_too_few_lines() {
        let err = parse_plan_text("1\nA\n\n10\n").unwrap_err();
        assert_eq!(err, PlanTextError::TooFewLines(3));
    }

    #[test]
    fn rejects_non_numeric_or_zero_step() {
        let err = parse_plan_text("1\tfoo\nA\tB\n1-1\t1-1\n5\t5\n").unwrap_err();
        assert!(
            matches!(err, PlanTextError::InvalidStep { column: 2, ref value } if value == "foo"),
            "expected InvalidStep, got: {err}"
        );

        let err = parse_plan_text("0\nA\n1-1\n5\n").unwrap_err();
        assert!(matches!(err, PlanTextError::InvalidStep { column: 1, .. }));
    }

    #[test]
    fn rejects_session_count_mismatch() {
        let err = parse_plan_text("1\t2\nA\n1-1\n5\n").unwrap_err();
        assert_eq!(
            err,
            PlanTextError::SessionCountMismatch {
                steps: 2,
                sessions: 1
            }
        );
    }

    #[test]
    fn rejects_missing_limits() {
        let err = parse_plan_text("1\t1\nA\tB\n1-2\t3-4\nx\t5-6\n").unwrap_err();
        assert_eq!(err, PlanTextError::MissingLimits(2));
    }

    #[test]
    fn rejects_malformed_paused_field() {
        let err = parse_plan_text("1\nA\n1-1\n10\nsoon\n").unwrap_err();
        assert_eq!(
            err,
            PlanTextError::InvalidPausedRange {
                line: 5,
                column: 1,
                value: "soon".into()
            }
        );
    }

    #[test]
    fn rejects_inverted_paused_range() {
        let err = parse_plan_text("1\nA\n1-1\n10\n\n8-3\n").unwrap_err();
        assert_eq!(
            err,
            PlanTextError::InvertedPausedRange {
                line: 6,
                column: 1,
                value: "8-3".into()
            }
        );
    }

    #[test]
    fn history_rows_with_wrong_width_are_ignored() {
        let plan = parse_plan_text("1\t1\nA\tB\n1-2\n3-4\t5-6\n9\t9\n").unwrap();
        assert_eq!(plan.sessions[0].history, [iv(3, 4)]);
        assert_eq!(plan.sessions[1].history, [iv(5, 6)]);
    }

    #[test]
    fn inverted_history_fields_are_skipped() {
        let plan = parse_plan_text("1\nA\n6-2\n1-3\n9\n").unwrap();
        assert_eq!(plan.sessions[0].history, [iv(1, 3)]);
    }

    #[test]
    fn leading_tabs_keep_columns_aligned() {
        let plan = parse_plan_text("1\t1\t1\nA\tB\tC\n1-1\t1-1\t1-1\n9\t9\t9\n\t\t4-5\n").unwrap();
        assert!(plan.sessions[0].paused.is_empty());
        assert!(plan.sessions[1].paused.is_empty());
        assert_eq!(plan.sessions[2].paused, [iv(4, 5)]);
    }

    #[test]
    fn handles_crlf_and_trailing_tabs() {
        let plan = parse_plan_text("2\t2\t\r\nA\tB\r\n1-2\t1-2\r\n10\t10\t\r\n").unwrap();
        assert_eq!(plan.sessions.len(), 2);
        assert_eq!(plan.sessions[1].limit, 10);
    }
}
