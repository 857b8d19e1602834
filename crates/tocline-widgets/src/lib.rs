#![forbid(unsafe_code)]

//! Outline view for tocline.
//!
//! [`OutlineView`] projects a tracker's heading snapshot into display rows
//! (label, indentation class, selection marker) and turns clicks and key
//! presses on those rows into navigation calls.

pub mod outline;
pub mod text;

pub use outline::{DEFAULT_LABEL_CAP, Indent, KeyCode, Marker, OutlineRow, OutlineView};
pub use text::{cap_graphemes, display_width, truncate_with_ellipsis};
