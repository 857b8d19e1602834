#![forbid(unsafe_code)]

//! The cursor walk.
//!
//! [`walk`] is a pure transition `(state, headings, geometry) -> state`. It
//! starts from the current cursor and moves it by as many steps as the live
//! geometry justifies, so continuous scrolling costs O(1) amortised and a
//! jump to the top or bottom costs O(n).
//!
//! # Rules
//!
//! Let `current` be the heading under the cursor.
//!
//! - **`current` above the viewport** (reader moved down): step forward while
//!   `current` is above the viewport and a next heading exists. Before each
//!   step, if the next heading is below the top band the walk stops; that
//!   heading has not reached the top yet. A next heading that cannot be
//!   measured is stepped onto and ends the walk.
//! - **`current` below the top band** (reader moved up): step back while
//!   `current` is below the top band and the cursor is above 0. A previous
//!   heading that is above the viewport or in the top band is the boundary:
//!   step onto it and stop. Otherwise step onto it and keep going if it is
//!   itself below the top band.
//! - **otherwise** (`AtTop` or the seam): the cursor is already right.
//!
//! Every accepted step updates the selection immediately and is reported to
//! the step observer passed to [`walk_with`].

use tocline_core::{GeometryOracle, HeadingSequence, OutlineError, ViewportBands};

use crate::state::{OutlineState, Selection};

/// Result of one walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkOutcome {
    /// Geometry was read and the cursor did not move.
    Unchanged,
    /// The cursor moved toward the end of the document.
    Advanced { from: usize, to: usize },
    /// The cursor moved toward the start of the document.
    Retreated { from: usize, to: usize },
    /// Nothing could be evaluated this cycle.
    Skipped(OutlineError),
}

impl WalkOutcome {
    /// Whether the cursor moved.
    #[must_use]
    pub fn moved(&self) -> bool {
        matches!(self, Self::Advanced { .. } | Self::Retreated { .. })
    }

    /// Number of entries the cursor crossed.
    #[must_use]
    pub fn distance(&self) -> usize {
        match *self {
            Self::Advanced { from, to } => to - from,
            Self::Retreated { from, to } => from - to,
            Self::Unchanged | Self::Skipped(_) => 0,
        }
    }

    /// Short stable name for logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unchanged => "unchanged",
            Self::Advanced { .. } => "advanced",
            Self::Retreated { .. } => "retreated",
            Self::Skipped(_) => "skipped",
        }
    }
}

/// Walk the cursor to the heading nearest the top of the viewport.
pub fn walk<O>(
    state: &OutlineState,
    headings: &HeadingSequence,
    oracle: &O,
    bands: &ViewportBands,
) -> (OutlineState, WalkOutcome)
where
    O: GeometryOracle + ?Sized,
{
    walk_with(state, headings, oracle, bands, |_| {})
}

/// [`walk`], reporting each intermediate selection to `on_step`.
pub fn walk_with<O, F>(
    state: &OutlineState,
    headings: &HeadingSequence,
    oracle: &O,
    bands: &ViewportBands,
    mut on_step: F,
) -> (OutlineState, WalkOutcome)
where
    O: GeometryOracle + ?Sized,
    F: FnMut(&Selection),
{
    if headings.is_empty() {
        return (OutlineState::cleared(), WalkOutcome::Skipped(OutlineError::EmptySequence));
    }

    // A state built against another snapshot is reconciled, never indexed.
    let base = if state.is_consistent_with(headings) {
        state.clone()
    } else {
        state.reconcile(headings).0
    };
    let Some(start) = base.cursor() else {
        return (base, WalkOutcome::Skipped(OutlineError::EmptySequence));
    };

    let measure = |index: usize| {
        headings
            .key_at(index)
            .and_then(|key| oracle.top_edge(key).ok())
            .map(|y| bands.classify(y))
    };

    let current = match headings.key_at(start).map(|key| oracle.top_edge(key)) {
        Some(Ok(y)) => bands.classify(y),
        Some(Err(err)) => return (base, WalkOutcome::Skipped(err.into())),
        None => {
            let len = headings.len();
            return (base, WalkOutcome::Skipped(OutlineError::StaleIndex { index: start, len }));
        }
    };

    let mut cursor = start;
    let mut step = |cursor: usize| {
        if let Some(key) = headings.key_at(cursor) {
            tracing::trace!(target: "tocline.tracker", cursor, key = %key, "walk step");
            on_step(&Selection {
                cursor,
                key: key.clone(),
            });
        }
    };

    if current.is_above_viewport() {
        let mut current_above = true;
        while current_above && cursor + 1 < headings.len() {
            match measure(cursor + 1) {
                Some(next) if next.is_below_top() => break,
                Some(next) => {
                    cursor += 1;
                    step(cursor);
                    current_above = next.is_above_viewport();
                }
                None => {
                    cursor += 1;
                    step(cursor);
                    break;
                }
            }
        }
    } else if current.is_below_top() {
        let mut current_below = true;
        while current_below && cursor > 0 {
            match measure(cursor - 1) {
                Some(prev) if prev.is_above_viewport() || prev.is_at_top() => {
                    cursor -= 1;
                    step(cursor);
                    break;
                }
                Some(prev) => {
                    cursor -= 1;
                    step(cursor);
                    current_below = prev.is_below_top();
                }
                None => {
                    cursor -= 1;
                    step(cursor);
                    break;
                }
            }
        }
    }

    let outcome = match cursor.cmp(&start) {
        std::cmp::Ordering::Greater => WalkOutcome::Advanced {
            from: start,
            to: cursor,
        },
        std::cmp::Ordering::Less => WalkOutcome::Retreated {
            from: start,
            to: cursor,
        },
        std::cmp::Ordering::Equal => WalkOutcome::Unchanged,
    };
    let next = OutlineState::at(headings, cursor).unwrap_or(base);
    (next, outcome)
}
