use dropplan_core::plan::Track;
use dropplan_core::{PlanFault, Session};

use crate::generate_cmd::read_description;

// -----------------------------------------------------------------------
// dropplan check <file>
// -----------------------------------------------------------------------

/// Parse a plan description and print one summary line per session.
pub fn run_check(path: &str) -> anyhow::Result<()> {
    let description = read_description(path)?;
    let sessions = &description.sessions;

    let name_w = name_width(sessions);
    let num_w = 6;

    // Header
    println!(
        "{:<name_w$}  {:>num_w$}  {:>num_w$}  {:>num_w$}  {:>num_w$}  START",
        "NAME", "STEP", "LIMIT", "PAUSED", "ISSUED",
    );

    // Rows
    for (index, session) in sessions.iter().enumerate() {
        println!(
            "{:<name_w$}  {:>num_w$}  {:>num_w$}  {:>num_w$}  {:>num_w$}  {}",
            session.name,
            session.step,
            session.limit,
            session.paused.len(),
            session.history.len(),
            start_label(index, session),
        );
    }

    println!();
    println!("{} sessions parsed", sessions.len());

    Ok(())
}

/// Width of the NAME column. Formatting pads by chars, so count chars.
fn name_width(sessions: &[Session]) -> usize {
    sessions
        .iter()
        .map(|s| s.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4)
}

/// Where generation would begin for `session`, or why it cannot.
fn start_label(index: usize, session: &Session) -> String {
    let cursor = Track::new(index, session).and_then(|track| track.initial_cursor());
    match cursor {
        Ok(_) if session.limit == 0 => "empty".to_string(),
        Ok(cursor) => cursor.to_string(),
        Err(PlanFault::TrackExhausted { .. }) => "exhausted".to_string(),
        Err(err) => err.to_string(),
    }
}
