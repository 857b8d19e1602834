#![forbid(unsafe_code)]

//! Error taxonomy for the outline tracker.
//!
//! None of these conditions is fatal. The tracker recovers from each one
//! locally and reports it as a skipped cycle; the worst case is a one-cycle
//! delay in highlight accuracy that the next scroll event corrects.

use std::fmt;

use crate::heading::HeadingKey;

/// The geometry oracle could not measure a heading (not laid out, detached).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeometryUnavailable {
    /// Heading that had no measurable position.
    pub key: HeadingKey,
}

impl GeometryUnavailable {
    /// Create a new error for `key`.
    #[must_use]
    pub fn new(key: HeadingKey) -> Self {
        Self { key }
    }
}

impl fmt::Display for GeometryUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "geometry unavailable for heading {}", self.key)
    }
}

impl std::error::Error for GeometryUnavailable {}

/// Recoverable tracker conditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutlineError {
    /// A heading had no measurable position; skip this cycle.
    GeometryUnavailable { key: HeadingKey },
    /// There are no headings; nothing to track.
    EmptySequence,
    /// An index did not address the current sequence.
    StaleIndex { index: usize, len: usize },
}

impl OutlineError {
    /// Short stable name for logs and counters.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::GeometryUnavailable { .. } => "geometry_unavailable",
            Self::EmptySequence => "empty_sequence",
            Self::StaleIndex { .. } => "stale_index",
        }
    }
}

impl fmt::Display for OutlineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GeometryUnavailable { key } => {
                write!(f, "geometry unavailable for heading {key}")
            }
            Self::EmptySequence => write!(f, "heading sequence is empty"),
            Self::StaleIndex { index, len } => {
                write!(f, "index {index} out of bounds for {len} headings")
            }
        }
    }
}

impl std::error::Error for OutlineError {}

impl From<GeometryUnavailable> for OutlineError {
    fn from(err: GeometryUnavailable) -> Self {
        Self::GeometryUnavailable { key: err.key }
    }
}
