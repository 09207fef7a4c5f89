//! Plan driver: walks every session through `drop_count` allocations.

use tracing::info;

use crate::error::PlanFault;
use crate::session::Session;

use super::track::Track;
use super::{Plan, PlanRow};

/// Limits applied to a generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Largest accepted drop count.
    pub max_drops: usize,
}

impl GeneratorConfig {
    pub const DEFAULT_MAX_DROPS: usize = 1000;

    pub fn new(max_drops: usize) -> Self {
        Self { max_drops }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_DROPS)
    }
}

/// Generates interval plans. Holds no state between calls.
#[derive(Debug, Clone, Default)]
pub struct PlanGenerator {
    config: GeneratorConfig,
}

impl PlanGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Produce `drop_count` rows, one token per session per row.
    ///
    /// Sessions are processed in order within each row and never affect one
    /// another. Any fault aborts the whole pass.
    pub fn generate(&self, drop_count: usize, sessions: &[Session]) -> Result<Plan, PlanFault> {
        if drop_count == 0 {
            return Err(PlanFault::NoDrops);
        }
        if drop_count > self.config.max_drops {
            return Err(PlanFault::TooManyDrops {
                requested: drop_count,
                max: self.config.max_drops,
            });
        }

        let tracks = sessions
            .iter()
            .enumerate()
            .map(|(index, session)| Track::new(index, session))
            .collect::<Result<Vec<_>, _>>()?;

        let mut cursors = tracks
            .iter()
            .map(Track::initial_cursor)
            .collect::<Result<Vec<_>, _>>()?;

        let mut rows = Vec::with_capacity(drop_count);
        for _ in 0..drop_count {
            let mut tokens = Vec::with_capacity(tracks.len());
            for (track, cursor) in tracks.iter().zip(cursors.iter_mut()) {
                let allocation = track.allocate(*cursor)?;
                tokens.push(allocation.token);
                *cursor = allocation.next;
            }
            rows.push(PlanRow::new(tokens));
        }

        info!(
            drops = drop_count,
            sessions = sessions.len(),
            "generated plan"
        );

        Ok(Plan {
            sessions: sessions.iter().map(|s| s.name.clone()).collect(),
            rows,
        })
    }
}

/// Generate with the default [`GeneratorConfig`].
pub fn generate_plan(drop_count: usize, sessions: &[Session]) -> Result<Plan, PlanFault> {
    PlanGenerator::default().generate(drop_count, sessions)
}
