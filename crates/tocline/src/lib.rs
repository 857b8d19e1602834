#![forbid(unsafe_code)]

//! tocline public facade crate.
//!
//! Re-exports the types a host needs to keep an outline in step with the
//! reader's scroll position, plus a prelude for day-to-day use.
//!
//! ```
//! use tocline::prelude::*;
//!
//! let headings = HeadingSequence::new(vec![
//!     HeadingEntry::new("a", "A", HeadingLevel::H2),
//!     HeadingEntry::new("b", "B", HeadingLevel::H2),
//!     HeadingEntry::new("c", "C", HeadingLevel::H2),
//! ]);
//! let geometry: PositionMap = [("a", -5.0), ("b", 5.0), ("c", 50.0)].into_iter().collect();
//!
//! let mut tracker = ScrollTracker::new(headings);
//! assert_eq!(tracker.walk(&geometry), WalkOutcome::Advanced { from: 0, to: 1 });
//! assert_eq!(tracker.selected_key().map(|k| k.as_str()), Some("b"));
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use tocline_core::{
    GeometryOracle, GeometryUnavailable, HeadingEntry, HeadingKey, HeadingLevel, HeadingSequence,
    ListenerId, OutlineError, Placement, PositionMap, ScrollSource, ViewportBands, classify,
};

// --- Runtime re-exports ----------------------------------------------------

pub use tocline_runtime::{
    ConfigError, NavigationOutcome, OutlineConfig, OutlineController, OutlineState,
    Reconciliation, ScrollCoalescer, ScrollTracker, Selection, TickReport, WalkOutcome,
    select_heading,
};

// --- Widget re-exports -----------------------------------------------------

#[cfg(feature = "widgets")]
pub use tocline_widgets::{Indent, KeyCode, Marker, OutlineRow, OutlineView};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for hosts that want a single error to propagate.
#[derive(Debug)]
pub enum Error {
    /// Configuration could not be loaded.
    Config(ConfigError),
    /// An outline operation was skipped.
    Outline(OutlineError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Outline(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Outline(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<OutlineError> for Error {
    fn from(err: OutlineError) -> Self {
        Self::Outline(err)
    }
}

impl From<GeometryUnavailable> for Error {
    fn from(err: GeometryUnavailable) -> Self {
        Self::Outline(err.into())
    }
}

/// Standard result type for tocline APIs.
pub type Result<T> = std::result::Result<T, Error>;

impl NavigationOutcomeExt for NavigationOutcome {
    fn into_result(self) -> Result<usize> {
        match self {
            NavigationOutcome::Selected { index, .. } => Ok(index),
            NavigationOutcome::Skipped(err) => Err(err.into()),
        }
    }
}

/// Conversion of a navigation outcome into a [`Result`], for hosts that
/// prefer `?` over matching.
pub trait NavigationOutcomeExt {
    /// Selected index, or the reason nothing changed.
    fn into_result(self) -> Result<usize>;
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Error, GeometryOracle, HeadingEntry, HeadingKey, HeadingLevel, HeadingSequence,
        NavigationOutcome, NavigationOutcomeExt, OutlineConfig, OutlineController, OutlineError,
        PositionMap, Result, ScrollSource, ScrollTracker, WalkOutcome,
    };

    #[cfg(feature = "widgets")]
    pub use crate::{KeyCode, OutlineView};

    pub use crate::{core, runtime};

    #[cfg(feature = "widgets")]
    pub use crate::widgets;
}

pub use tocline_core as core;
pub use tocline_runtime as runtime;
#[cfg(feature = "widgets")]
pub use tocline_widgets as widgets;
