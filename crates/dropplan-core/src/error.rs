//! Faults that abort a generation pass.

use thiserror::Error;

/// Which stage rejected the pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// The request itself is unusable (drop count, step).
    Config,
    /// A session's cursor could not make progress.
    Generation,
}

/// Errors that abort plan generation. No partial plan is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanFault {
    #[error("number of drops must be positive")]
    NoDrops,

    #[error("number of drops {requested} exceeds the configured maximum of {max}")]
    TooManyDrops { requested: usize, max: usize },

    #[error("session {index} ({name:?}) has a step of zero")]
    ZeroStep { index: usize, name: String },

    #[error(
        "paused ranges cover the whole track [1, {limit}] of session {index} ({name:?}); \
         no start position is available"
    )]
    TrackExhausted {
        index: usize,
        name: String,
        limit: u64,
    },
}

impl PlanFault {
    pub fn kind(&self) -> FaultKind {
        match self {
            Self::NoDrops | Self::TooManyDrops { .. } | Self::ZeroStep { .. } => FaultKind::Config,
            Self::TrackExhausted { .. } => FaultKind::Generation,
        }
    }

    /// Index of the offending session, when the fault belongs to one.
    pub fn session_index(&self) -> Option<usize> {
        match self {
            Self::ZeroStep { index, .. } | Self::TrackExhausted { index, .. } => Some(*index),
            Self::NoDrops | Self::TooManyDrops { .. } => None,
        }
    }
}
