#![forbid(unsafe_code)]

//! Core: heading model, viewport geometry, and the host-facing interfaces.
//!
//! # Role in tocline
//! `tocline-core` is the leaf layer. It owns the heading snapshot types that
//! the host document produces, the fixed-band classifier that decides where a
//! heading sits relative to the top of the viewport, and the two capabilities
//! the host must provide: a [`GeometryOracle`](oracle::GeometryOracle) and a
//! [`ScrollSource`](oracle::ScrollSource).
//!
//! # How it fits in the system
//! The runtime (`tocline-runtime`) consumes these types to drive the cursor
//! walk. Nothing in this crate holds mutable cursor state; every function is
//! a pure query over a snapshot or a single live measurement.

pub mod error;
pub mod geometry;
pub mod heading;
pub mod logging;
pub mod oracle;

pub use error::{GeometryUnavailable, OutlineError};
pub use geometry::{Placement, ViewportBands, classify};
pub use heading::{HeadingEntry, HeadingKey, HeadingLevel, HeadingSequence};
pub use oracle::{GeometryOracle, ListenerId, PositionMap, ScrollSource};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, error, info, info_span, trace, trace_span, warn};
