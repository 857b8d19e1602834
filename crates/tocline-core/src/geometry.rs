#![forbid(unsafe_code)]

//! Viewport geometry classification.
//!
//! A heading's live top-edge position `y` (viewport coordinates, 0 = top of
//! the visible area, growing downward) falls into one of the bands below:
//!
//! | Band | Condition (defaults) | [`Placement`] |
//! |------|----------------------|---------------|
//! | scrolled past | `y <= 0` | [`Placement::AboveViewport`] |
//! | active band | `0.26 < y < 9` | [`Placement::AtTop`] |
//! | visible, not at top | `y > 9` | [`Placement::BelowTop`] |
//! | seam | `0 < y <= 0.26`, `y == 9`, NaN | [`Placement::Unbanded`] |
//!
//! The seam is kept exactly as the thresholds produce it. It matches none of
//! the three predicates, which the cursor walk relies on: a current heading in
//! the seam is left alone, and a neighbouring heading in the seam does not
//! trigger the overshoot guard.

/// Where a heading sits relative to the top of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    /// The heading's top edge has scrolled above the visible area.
    AboveViewport,
    /// The heading sits in the narrow band at the top of the page.
    AtTop,
    /// The heading is visible but not yet at the top.
    BelowTop,
    /// The position falls between bands.
    Unbanded,
}

impl Placement {
    /// `y <= above_max`.
    #[inline]
    #[must_use]
    pub const fn is_above_viewport(self) -> bool {
        matches!(self, Self::AboveViewport)
    }

    /// `top_band_min < y < top_band_max`.
    #[inline]
    #[must_use]
    pub const fn is_at_top(self) -> bool {
        matches!(self, Self::AtTop)
    }

    /// `y > top_band_max`.
    #[inline]
    #[must_use]
    pub const fn is_below_top(self) -> bool {
        matches!(self, Self::BelowTop)
    }

    /// Short stable name for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AboveViewport => "above_viewport",
            Self::AtTop => "at_top",
            Self::BelowTop => "below_top",
            Self::Unbanded => "unbanded",
        }
    }
}

/// Band thresholds used by [`ViewportBands::classify`].
///
/// The defaults are sized to roughly one line height at the top of the
/// viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportBands {
    /// Positions at or below this value are above the viewport.
    pub above_max: f64,
    /// Exclusive lower bound of the active band.
    pub top_band_min: f64,
    /// Exclusive upper bound of the active band; positions above it are
    /// below the top.
    pub top_band_max: f64,
}

impl ViewportBands {
    /// Default `above_max`.
    pub const DEFAULT_ABOVE_MAX: f64 = 0.0;
    /// Default `top_band_min`.
    pub const DEFAULT_TOP_BAND_MIN: f64 = 0.26;
    /// Default `top_band_max`.
    pub const DEFAULT_TOP_BAND_MAX: f64 = 9.0;

    /// Create bands with explicit thresholds.
    #[must_use]
    pub const fn new(above_max: f64, top_band_min: f64, top_band_max: f64) -> Self {
        Self {
            above_max,
            top_band_min,
            top_band_max,
        }
    }

    /// Classify a live top-edge position.
    #[must_use]
    pub fn classify(&self, y: f64) -> Placement {
        if y <= self.above_max {
            Placement::AboveViewport
        } else if y > self.top_band_min && y < self.top_band_max {
            Placement::AtTop
        } else if y > self.top_band_max {
            Placement::BelowTop
        } else {
            Placement::Unbanded
        }
    }

    /// Check that thresholds are finite and ordered.
    ///
    /// Returns a list of problems; empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        for (name, value) in [
            ("above_max", self.above_max),
            ("top_band_min", self.top_band_min),
            ("top_band_max", self.top_band_max),
        ] {
            if !value.is_finite() {
                errors.push(format!("{name} must be finite, got {value}"));
            }
        }
        if self.top_band_min < self.above_max {
            errors.push(format!(
                "top_band_min ({}) must be >= above_max ({})",
                self.top_band_min, self.above_max
            ));
        }
        if self.top_band_max <= self.top_band_min {
            errors.push(format!(
                "top_band_max ({}) must be > top_band_min ({})",
                self.top_band_max, self.top_band_min
            ));
        }
        errors
    }
}

impl Default for ViewportBands {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_ABOVE_MAX,
            Self::DEFAULT_TOP_BAND_MIN,
            Self::DEFAULT_TOP_BAND_MAX,
        )
    }
}

/// Classify `y` with the default bands.
#[inline]
#[must_use]
pub fn classify(y: f64) -> Placement {
    ViewportBands::default().classify(y)
}
