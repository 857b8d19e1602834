#![forbid(unsafe_code)]

//! tocline Runtime
//!
//! Stateful components that keep an outline's active entry in step with the
//! reader's scroll position.
//!
//! # Key Components
//!
//! - [`ScrollTracker`] - Owns the heading snapshot and the cursor, runs walks
//! - [`walk`](walk::walk) - Pure cursor transition over live geometry
//! - [`ScrollCoalescer`] - Folds scroll bursts into one trailing walk
//! - [`select_heading`] - Click/keyboard navigation to a heading
//! - [`OutlineController`] - Wires the above to a host scroll source
//! - [`OutlineConfig`] - Tunables, loadable from TOML/JSON with `policy-config`
//!
//! # Role in tocline
//! `tocline-runtime` sits between `tocline-core` (types and host interfaces)
//! and `tocline-widgets` (row presentation). It holds the only mutable
//! outline state in the system.
//!
//! # Tracing targets
//! - `tocline.tracker`: walk steps, advances, retreats, skips, replacements
//! - `tocline.coalescer`: scheduling and firing
//! - `tocline.navigation`: explicit selections
//! - `tocline.controller`: mount and teardown

pub mod coalescer;
pub mod config;
pub mod controller;
pub mod navigation;
pub mod state;
pub mod tracker;
pub mod walk;

pub use coalescer::{CoalescedBurst, CoalescerStats, DEFAULT_QUIET_PERIOD, ScrollCoalescer};
pub use config::{BandsConfig, ConfigError, OutlineConfig};
pub use controller::{OutlineController, TickReport};
pub use navigation::{NavigationOutcome, select_heading};
pub use state::{OutlineState, Reconciliation, Selection};
pub use tracker::{ScrollTracker, TrackerStats};
pub use walk::WalkOutcome;
