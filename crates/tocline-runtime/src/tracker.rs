#![forbid(unsafe_code)]

//! Scroll position tracker.
//!
//! [`ScrollTracker`] owns the heading snapshot and the [`OutlineState`] built
//! against it. Each coalesced scroll calls [`ScrollTracker::walk`], which runs
//! the pure [`walk`](crate::walk::walk_with) transition and stores the result.
//! All recoverable conditions are logged and counted here; nothing is
//! returned as an error.
//!
//! A heading chosen by navigation is pinned at the position the scroll left
//! it in. Walks that find it unmoved keep the cursor there, even when the
//! document could not scroll far enough to bring it to the top band. The
//! pin is released by the first walk that sees the heading somewhere else.

use tocline_core::{GeometryOracle, HeadingKey, HeadingSequence, OutlineError, ViewportBands};

use crate::state::{OutlineState, Reconciliation, Selection};
use crate::walk::{WalkOutcome, walk_with};

/// Monotonic counters for one tracker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackerStats {
    /// Walks attempted.
    pub walks: u64,
    /// Walks that moved the cursor forward.
    pub advances: u64,
    /// Walks that moved the cursor backward.
    pub retreats: u64,
    /// Walks skipped for empty sequences or missing geometry.
    pub skips: u64,
    /// Individual cursor steps across all walks.
    pub steps: u64,
    /// Direct selections (navigation).
    pub direct_sets: u64,
    /// Sequence replacements.
    pub replacements: u64,
    /// Walks that kept a navigated selection in place.
    pub holds: u64,
}

/// Where navigation left the selected heading.
#[derive(Debug, Clone, PartialEq)]
struct Pin {
    index: usize,
    key: HeadingKey,
    top_edge: f64,
}

/// Stateful wrapper around the cursor walk.
#[derive(Debug, Clone)]
pub struct ScrollTracker {
    headings: HeadingSequence,
    state: OutlineState,
    bands: ViewportBands,
    stats: TrackerStats,
    pin: Option<Pin>,
}

impl ScrollTracker {
    /// Create a tracker with the cursor on the first heading.
    #[must_use]
    pub fn new(headings: HeadingSequence) -> Self {
        Self::with_bands(headings, ViewportBands::default())
    }

    /// Create a tracker with custom classification bands.
    #[must_use]
    pub fn with_bands(headings: HeadingSequence, bands: ViewportBands) -> Self {
        let state = OutlineState::initial(&headings);
        Self {
            headings,
            state,
            bands,
            stats: TrackerStats::default(),
            pin: None,
        }
    }

    /// Current heading snapshot.
    #[must_use]
    pub fn headings(&self) -> &HeadingSequence {
        &self.headings
    }

    /// Current cursor state.
    #[must_use]
    pub fn state(&self) -> &OutlineState {
        &self.state
    }

    /// Cursor index, if any.
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.state.cursor()
    }

    /// Key of the active heading, if any.
    #[must_use]
    pub fn selected_key(&self) -> Option<&HeadingKey> {
        self.state.selected_key()
    }

    /// Classification bands.
    #[must_use]
    pub fn bands(&self) -> &ViewportBands {
        &self.bands
    }

    /// Replace the classification bands.
    pub fn set_bands(&mut self, bands: ViewportBands) {
        self.bands = bands;
    }

    /// Counters since creation.
    #[must_use]
    pub fn stats(&self) -> TrackerStats {
        self.stats
    }

    /// Swap in a new heading snapshot and re-validate the cursor.
    pub fn replace_headings(&mut self, headings: HeadingSequence) -> Reconciliation {
        let (state, how) = self.state.reconcile(&headings);
        self.stats.replacements += 1;

        match how {
            Reconciliation::Clamped { from, to } => {
                let err = OutlineError::StaleIndex {
                    index: from,
                    len: headings.len(),
                };
                tracing::debug!(
                    target: "tocline.tracker",
                    error = %err,
                    clamped_to = to,
                    "cursor clamped after heading replacement"
                );
            }
            _ => {
                tracing::debug!(
                    target: "tocline.tracker",
                    headings = headings.len(),
                    reconciliation = ?how,
                    "headings replaced"
                );
            }
        }

        self.headings = headings;
        self.state = state;
        self.pin = None;
        how
    }

    /// Run one walk against live geometry.
    pub fn walk<O>(&mut self, oracle: &O) -> WalkOutcome
    where
        O: GeometryOracle + ?Sized,
    {
        self.walk_observed(oracle, |_| {})
    }

    /// Run one walk, reporting each intermediate selection to `on_step`.
    pub fn walk_observed<O, F>(&mut self, oracle: &O, mut on_step: F) -> WalkOutcome
    where
        O: GeometryOracle + ?Sized,
        F: FnMut(&Selection),
    {
        self.stats.walks += 1;
        if let Some(pin) = self.pin.take() {
            if self.pin_holds(&pin, oracle) {
                self.stats.holds += 1;
                tracing::trace!(
                    target: "tocline.tracker",
                    cursor = pin.index,
                    key = %pin.key,
                    "walk held at navigated heading"
                );
                self.pin = Some(pin);
                return WalkOutcome::Unchanged;
            }
        }

        let mut steps = 0u64;
        let (state, outcome) = walk_with(&self.state, &self.headings, oracle, &self.bands, |sel| {
            steps += 1;
            on_step(sel);
        });
        self.state = state;
        self.stats.steps += steps;

        match &outcome {
            WalkOutcome::Advanced { from, to } => {
                self.stats.advances += 1;
                tracing::debug!(target: "tocline.tracker", from, to, "cursor advanced");
            }
            WalkOutcome::Retreated { from, to } => {
                self.stats.retreats += 1;
                tracing::debug!(target: "tocline.tracker", from, to, "cursor retreated");
            }
            WalkOutcome::Skipped(err) => {
                self.stats.skips += 1;
                tracing::trace!(
                    target: "tocline.tracker",
                    reason = err.kind(),
                    error = %err,
                    "walk skipped"
                );
            }
            WalkOutcome::Unchanged => {}
        }
        outcome
    }

    /// Put the cursor on `index` directly, bypassing the walk.
    ///
    /// Returns the new selection, or [`OutlineError::StaleIndex`] if `index`
    /// does not address the current snapshot.
    pub fn select_index(&mut self, index: usize) -> Result<&Selection, OutlineError> {
        let state = OutlineState::at(&self.headings, index).ok_or(OutlineError::StaleIndex {
            index,
            len: self.headings.len(),
        })?;
        self.state = state;
        self.pin = None;
        self.stats.direct_sets += 1;
        self.state.selection().ok_or(OutlineError::EmptySequence)
    }

    /// Pin the current selection at `top_edge`.
    ///
    /// Walks leave the cursor alone while the selected heading still
    /// measures `top_edge`.
    pub(crate) fn pin_selection(&mut self, top_edge: f64) {
        self.pin = self.state.selection().map(|sel| Pin {
            index: sel.cursor,
            key: sel.key.clone(),
            top_edge,
        });
    }

    /// Whether a navigated selection is pinned.
    #[must_use]
    pub fn is_pinned(&self) -> bool {
        self.pin.is_some()
    }

    fn pin_holds<O>(&self, pin: &Pin, oracle: &O) -> bool
    where
        O: GeometryOracle + ?Sized,
    {
        self.state.cursor() == Some(pin.index)
            && self.headings.key_at(pin.index) == Some(&pin.key)
            && oracle.top_edge(&pin.key).is_ok_and(|y| y == pin.top_edge)
    }
}
