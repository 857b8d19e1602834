#![forbid(unsafe_code)]

//! Outline configuration.
//!
//! [`OutlineConfig`] gathers the tunables of the tracker and coalescer. With
//! the `policy-config` feature it can be loaded from TOML or JSON:
//!
//! ```toml
//! # tocline.toml
//! quiet_period_ms = 10
//!
//! [bands]
//! above_max = 0.0
//! top_band_min = 0.26
//! top_band_max = 9.0
//! ```
//!
//! ```rust,ignore
//! let config = OutlineConfig::from_toml_file("tocline.toml")?;
//! let config = OutlineConfig::from_json_str(json)?;
//! ```
//!
//! Every field defaults to the value the components use when constructed
//! without a config, so `OutlineConfig::default()` changes nothing.

#[cfg(feature = "policy-config")]
use std::path::Path;

#[cfg(feature = "policy-config")]
use serde::{Deserialize, Serialize};

use tocline_core::ViewportBands;
use web_time::Duration;

use crate::coalescer::DEFAULT_QUIET_PERIOD;

// ---------------------------------------------------------------------------
// OutlineConfig
// ---------------------------------------------------------------------------

/// Tunables for one outline controller.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "policy-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "policy-config", serde(default))]
pub struct OutlineConfig {
    /// Quiet period before a coalesced walk runs, in milliseconds.
    pub quiet_period_ms: u64,

    /// Classification band thresholds.
    pub bands: BandsConfig,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            quiet_period_ms: DEFAULT_QUIET_PERIOD.as_millis() as u64,
            bands: BandsConfig::default(),
        }
    }
}

impl OutlineConfig {
    /// Largest accepted quiet period.
    pub const MAX_QUIET_PERIOD_MS: u64 = 5_000;

    /// Quiet period as a [`Duration`].
    #[must_use]
    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.quiet_period_ms)
    }

    /// Band thresholds as [`ViewportBands`].
    #[must_use]
    pub fn viewport_bands(&self) -> ViewportBands {
        self.bands.to_viewport_bands()
    }

    /// Validate all parameters.
    ///
    /// Returns a list of problems; an empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.quiet_period_ms > Self::MAX_QUIET_PERIOD_MS {
            errors.push(format!(
                "quiet_period_ms must be <= {}, got {}",
                Self::MAX_QUIET_PERIOD_MS,
                self.quiet_period_ms
            ));
        }
        errors.extend(
            self.viewport_bands()
                .validate()
                .into_iter()
                .map(|e| format!("bands.{e}")),
        );
        errors
    }

    /// Load from a TOML string.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.checked()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "policy-config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.checked()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "policy-config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Serialize to a TOML string.
    #[cfg(feature = "policy-config")]
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::Validation(vec![e.to_string()]))
    }

    #[cfg(feature = "policy-config")]
    fn checked(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ---------------------------------------------------------------------------
// BandsConfig
// ---------------------------------------------------------------------------

/// Serializable mirror of [`ViewportBands`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "policy-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "policy-config", serde(default))]
pub struct BandsConfig {
    /// Positions at or below this are above the viewport.
    pub above_max: f64,
    /// Exclusive lower bound of the active band.
    pub top_band_min: f64,
    /// Exclusive upper bound of the active band.
    pub top_band_max: f64,
}

impl Default for BandsConfig {
    fn default() -> Self {
        Self {
            above_max: ViewportBands::DEFAULT_ABOVE_MAX,
            top_band_min: ViewportBands::DEFAULT_TOP_BAND_MIN,
            top_band_max: ViewportBands::DEFAULT_TOP_BAND_MAX,
        }
    }
}

impl BandsConfig {
    /// Convert to the classifier's band type.
    #[must_use]
    pub fn to_viewport_bands(&self) -> ViewportBands {
        ViewportBands::new(self.above_max, self.top_band_min, self.top_band_max)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from loading an [`OutlineConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "policy-config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "policy-config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "policy-config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "policy-config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "policy-config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "policy-config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
