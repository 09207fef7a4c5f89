//! Shared fixtures for dropplan integration tests.
//!
//! Provides short constructors for intervals and sessions, a realistic plan
//! description, and a helper that writes a description to a temporary file
//! for CLI tests.

use std::io::Write;

use tempfile::NamedTempFile;

use dropplan_core::{Interval, Plan, Session};

/// A three-session description with history, limits and paused rows.
///
/// - `Morning`: step 2, limit 20, last issued `3-4`, paused `7-8`.
/// - `Noon`: step 5, limit 10, last issued `6-10` (at the limit).
/// - `Night`: step 3, limit 9, no usable history, paused `1`.
pub const SAMPLE_DESCRIPTION: &str = "2\t5\t3
Morning\tNoon\tNight
1-2\t1-5\tLimite
3-4\t6-10\tX
20\t10\t9
7-8\tx\t1
";

/// Build an interval, panicking on inverted bounds.
pub fn iv(start: u64, end: u64) -> Interval {
    Interval::new(start, end).unwrap_or_else(|| panic!("inverted test interval {start}-{end}"))
}

/// A session with no paused or historical ranges.
pub fn session(name: &str, step: u64, limit: u64) -> Session {
    Session::new(name, step, limit)
}

/// Rendered tokens of one plan column.
pub fn column_text(plan: &Plan, index: usize) -> Vec<String> {
    plan.column(index).map(|token| token.to_string()).collect()
}

/// Write `content` to a fresh temporary file. The file is removed when the
/// returned handle drops.
pub fn write_description(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp description file");
    file.write_all(content.as_bytes())
        .expect("failed to write temp description file");
    file.flush().expect("failed to flush temp description file");
    file
}
