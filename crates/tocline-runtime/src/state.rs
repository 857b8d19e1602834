#![forbid(unsafe_code)]

//! Outline cursor state.
//!
//! [`OutlineState`] is a plain value: the tracker owns one, the pure
//! [`walk`](crate::walk::walk) transition takes one and returns the next.
//! The cursor and the selected key always travel together as a
//! [`Selection`], so they cannot drift apart.

use tocline_core::{HeadingKey, HeadingSequence};

/// The active outline entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Index into the heading sequence.
    pub cursor: usize,
    /// Key of the entry at `cursor`.
    pub key: HeadingKey,
}

/// Cursor state owned by a tracker.
///
/// Invariant: when a selection exists it addresses the sequence it was built
/// against (`cursor < len` and `key == sequence[cursor].key`). An empty
/// sequence has no selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutlineState {
    selection: Option<Selection>,
}

/// How [`OutlineState::reconcile`] adjusted the cursor for a new sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// Same key at the same index.
    Kept,
    /// Selected key moved; the cursor followed it.
    Reanchored { from: usize, to: usize },
    /// Selected key vanished; the cursor kept its index and took the new key.
    Rekeyed { index: usize },
    /// Selected key vanished and the old index was out of bounds.
    Clamped { from: usize, to: usize },
    /// There was no selection; the first entry is now selected.
    Initialized,
    /// The new sequence is empty; the selection was dropped.
    Cleared,
}

impl OutlineState {
    /// State for a freshly rendered outline: cursor 0, or nothing when empty.
    #[must_use]
    pub fn initial(headings: &HeadingSequence) -> Self {
        Self::at(headings, 0).unwrap_or_default()
    }

    /// State with the cursor at `index`, if in bounds.
    #[must_use]
    pub fn at(headings: &HeadingSequence, index: usize) -> Option<Self> {
        let key = headings.key_at(index)?.clone();
        Some(Self {
            selection: Some(Selection { cursor: index, key }),
        })
    }

    /// State with no selection.
    #[must_use]
    pub fn cleared() -> Self {
        Self::default()
    }

    /// The active selection, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Cursor index, if any.
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.selection.as_ref().map(|s| s.cursor)
    }

    /// Key of the active entry, if any.
    #[must_use]
    pub fn selected_key(&self) -> Option<&HeadingKey> {
        self.selection.as_ref().map(|s| &s.key)
    }

    /// Whether `key` is the active entry.
    #[must_use]
    pub fn is_selected(&self, key: &HeadingKey) -> bool {
        self.selected_key() == Some(key)
    }

    /// Whether the selection (or its absence) is valid for `headings`.
    #[must_use]
    pub fn is_consistent_with(&self, headings: &HeadingSequence) -> bool {
        match &self.selection {
            None => headings.is_empty(),
            Some(sel) => headings.key_at(sel.cursor) == Some(&sel.key),
        }
    }

    /// Adjust this state for a replacement sequence.
    ///
    /// The selected key wins when it survives; otherwise the old index is
    /// kept when still in bounds and clamped to the last entry when not.
    #[must_use]
    pub fn reconcile(&self, headings: &HeadingSequence) -> (Self, Reconciliation) {
        if headings.is_empty() {
            return (Self::cleared(), Reconciliation::Cleared);
        }
        let Some(sel) = &self.selection else {
            return (Self::initial(headings), Reconciliation::Initialized);
        };

        if headings.key_at(sel.cursor) == Some(&sel.key) {
            return (self.clone(), Reconciliation::Kept);
        }
        if let Some(pos) = headings.position_of(&sel.key) {
            let how = Reconciliation::Reanchored {
                from: sel.cursor,
                to: pos,
            };
            return (Self::at(headings, pos).unwrap_or_default(), how);
        }

        let last = headings.len() - 1;
        if sel.cursor > last {
            let next = Self::at(headings, last).unwrap_or_default();
            (
                next,
                Reconciliation::Clamped {
                    from: sel.cursor,
                    to: last,
                },
            )
        } else {
            let next = Self::at(headings, sel.cursor).unwrap_or_default();
            (next, Reconciliation::Rekeyed { index: sel.cursor })
        }
    }
}
