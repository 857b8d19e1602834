#![forbid(unsafe_code)]

//! Logging facade.
//!
//! With the `tracing` feature the usual macros are re-exported so downstream
//! crates can log through `tocline_core::debug!` without naming `tracing`
//! directly. With `tracing-json` a JSON subscriber can be installed for
//! production logs.
//!
//! Log targets used across the workspace:
//!
//! | Target | Emitted by |
//! |--------|------------|
//! | `tocline.tracker` | cursor walk and sequence replacement |
//! | `tocline.coalescer` | quiet-period scheduling |
//! | `tocline.navigation` | explicit heading selection |
//! | `tocline.controller` | mount / teardown lifecycle |
//! | `tocline.widgets` | row activation (with the widgets `tracing` feature) |
//! | `tocline.harness` | replay summaries |

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, error, info, info_span, trace, trace_span, warn};

/// Environment variable consulted for the log filter.
pub const LOG_ENV: &str = "TOCLINE_LOG";

/// Install a JSON-formatting global subscriber filtered by [`LOG_ENV`].
///
/// Falls back to `info` when the variable is unset or unparsable. Returns
/// `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_subscriber() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}
