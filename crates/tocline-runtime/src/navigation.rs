#![forbid(unsafe_code)]

//! Explicit heading selection.
//!
//! A click (or keyboard activation) on an outline row scrolls the document to
//! that heading and puts the cursor on it directly. This is the only path that
//! moves the cursor to a non-adjacent entry without walking through the ones
//! in between. Repeating the same selection leaves the state unchanged.

use tocline_core::{GeometryOracle, HeadingKey, OutlineError};

use crate::tracker::ScrollTracker;

/// Result of [`select_heading`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The viewport was asked to show the heading and the cursor is on it.
    Selected {
        index: usize,
        key: HeadingKey,
        previous: Option<usize>,
    },
    /// Nothing changed.
    Skipped(OutlineError),
}

impl NavigationOutcome {
    /// Selected index, if the selection went through.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Selected { index, .. } => Some(*index),
            Self::Skipped(_) => None,
        }
    }
}

/// Scroll `key` into view and select it.
///
/// `index` is where the caller saw the heading. If the snapshot changed since
/// and `index` no longer addresses `key`, the key's current position is used;
/// a key that is gone altogether is reported as
/// [`OutlineError::StaleIndex`]. When the oracle cannot scroll to the
/// heading, the selection is left untouched.
pub fn select_heading<O>(
    tracker: &mut ScrollTracker,
    oracle: &mut O,
    key: &HeadingKey,
    index: usize,
) -> NavigationOutcome
where
    O: GeometryOracle + ?Sized,
{
    let headings = tracker.headings();
    if headings.is_empty() {
        return skipped(OutlineError::EmptySequence);
    }

    let resolved = if headings.key_at(index) == Some(key) {
        index
    } else if let Some(pos) = headings.position_of(key) {
        tracing::debug!(
            target: "tocline.navigation",
            key = %key,
            requested = index,
            resolved = pos,
            "selection index resolved by key"
        );
        pos
    } else {
        return skipped(OutlineError::StaleIndex {
            index,
            len: headings.len(),
        });
    };

    if let Err(err) = oracle.scroll_into_view(key) {
        return skipped(err.into());
    }

    let previous = tracker.cursor();
    let key = match tracker.select_index(resolved) {
        Ok(selection) => selection.key.clone(),
        Err(err) => return skipped(err),
    };
    // The scroll may stop short of the top band near the end of the page.
    if let Ok(y) = oracle.top_edge(&key) {
        tracker.pin_selection(y);
    }
    tracing::debug!(
        target: "tocline.navigation",
        key = %key,
        index = resolved,
        previous = ?previous,
        "heading selected"
    );
    NavigationOutcome::Selected {
        index: resolved,
        key,
        previous,
    }
}

fn skipped(err: OutlineError) -> NavigationOutcome {
    tracing::debug!(
        target: "tocline.navigation",
        reason = err.kind(),
        error = %err,
        "selection skipped"
    );
    NavigationOutcome::Skipped(err)
}
