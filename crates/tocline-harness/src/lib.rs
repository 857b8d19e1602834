#![forbid(unsafe_code)]

//! Test harness and reference fixtures for tocline.
//!
//! - [`document`]: a synthetic page with fixed heading offsets that acts as
//!   both geometry oracle and scroll source.
//! - [`scroll_script`]: seeded scroll event generators.
//! - [`replay`]: drives a controller through a script and records a JSONL
//!   trace of every walk.

pub mod document;
pub mod replay;
pub mod scroll_script;

pub use document::{ScrollAlign, SyntheticDocument};
pub use replay::{ReplayReport, WalkRecord, controller_for, replay};
pub use scroll_script::{
    ScrollPattern, ScrollPatternKind, ScrollScript, ScrollScriptConfig, ScrollStep,
    generate_script,
};
