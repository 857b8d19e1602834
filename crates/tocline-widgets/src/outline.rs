#![forbid(unsafe_code)]

//! Outline rows and activation.
//!
//! # Example
//!
//! ```
//! use tocline_core::{HeadingEntry, HeadingLevel, HeadingSequence};
//! use tocline_runtime::ScrollTracker;
//! use tocline_widgets::{Indent, Marker, OutlineView};
//!
//! let headings = HeadingSequence::new(vec![
//!     HeadingEntry::new("intro", "Intro", HeadingLevel::H2),
//!     HeadingEntry::new("setup", "Setup", HeadingLevel::H3),
//! ]);
//! let tracker = ScrollTracker::new(headings);
//! let rows = OutlineView::new().rows(&tracker);
//!
//! assert_eq!(rows[0].marker, Marker::Dot);
//! assert_eq!(rows[1].indent, Indent::Heading3);
//! ```

use tocline_core::{GeometryOracle, HeadingKey, HeadingLevel, OutlineError};
use tocline_runtime::{NavigationOutcome, OutlineController, ScrollTracker};

use crate::text::{cap_graphemes, truncate_with_ellipsis};

/// Indentation class of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indent {
    /// Second-level heading.
    Heading2,
    /// Third-level heading.
    Heading3,
    /// Any other level.
    Flat,
}

impl Indent {
    /// Class for a heading level.
    #[must_use]
    pub const fn for_level(level: HeadingLevel) -> Self {
        match level {
            HeadingLevel::H2 => Self::Heading2,
            HeadingLevel::H3 => Self::Heading3,
            _ => Self::Flat,
        }
    }

    /// Leading cells for text rendering.
    #[must_use]
    pub const fn columns(self) -> usize {
        match self {
            Self::Flat => 0,
            Self::Heading2 => 2,
            Self::Heading3 => 4,
        }
    }
}

/// Marker drawn in front of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// The active entry.
    Dot,
    /// Every other entry.
    Bar,
}

impl Marker {
    /// Marker for a row with the given selection state.
    #[must_use]
    pub const fn for_selected(selected: bool) -> Self {
        if selected { Self::Dot } else { Self::Bar }
    }

    /// Glyph for text rendering.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Dot => "\u{25CF}",
            Self::Bar => "\u{2502}",
        }
    }
}

/// One display row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineRow {
    pub index: usize,
    pub key: HeadingKey,
    pub label: String,
    pub level: HeadingLevel,
    pub indent: Indent,
    pub marker: Marker,
    pub selected: bool,
    pub focused: bool,
}

/// Keys the outline responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Enter,
    Char(char),
    Up,
    Down,
    Home,
    End,
}

/// Labels longer than this many graphemes are cut and end in `"..."`.
pub const DEFAULT_LABEL_CAP: usize = 27;

/// Outline presentation state: keyboard focus and label fitting.
///
/// The active entry lives in the tracker; the view reads it on every
/// projection and never caches it.
#[derive(Debug, Clone)]
pub struct OutlineView {
    focus: Option<usize>,
    ellipsis: String,
    label_cap: Option<usize>,
}

impl Default for OutlineView {
    fn default() -> Self {
        Self::new()
    }
}

impl OutlineView {
    /// A view with no focused row.
    #[must_use]
    pub fn new() -> Self {
        Self {
            focus: None,
            ellipsis: "\u{2026}".to_string(),
            label_cap: Some(DEFAULT_LABEL_CAP),
        }
    }

    /// Cap row labels at `cap` graphemes, or never with `None`.
    #[must_use]
    pub fn with_label_cap(mut self, cap: Option<usize>) -> Self {
        self.label_cap = cap;
        self
    }

    /// Replace the ellipsis used when labels are cut.
    #[must_use]
    pub fn with_ellipsis(mut self, ellipsis: impl Into<String>) -> Self {
        self.ellipsis = ellipsis.into();
        self
    }

    /// Focused row, if any.
    #[must_use]
    pub fn focus(&self) -> Option<usize> {
        self.focus
    }

    /// Focus a row. Out-of-range rows clamp to the last one.
    pub fn set_focus(&mut self, index: Option<usize>, len: usize) {
        self.focus = match (index, len) {
            (_, 0) | (None, _) => None,
            (Some(i), len) => Some(i.min(len - 1)),
        };
    }

    /// Project the tracker's snapshot into rows.
    ///
    /// A row is selected when its key is the tracker's selected key.
    #[must_use]
    pub fn rows(&self, tracker: &ScrollTracker) -> Vec<OutlineRow> {
        let state = tracker.state();
        tracker
            .headings()
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let selected = state.is_selected(&entry.key);
                OutlineRow {
                    index,
                    key: entry.key.clone(),
                    label: match self.label_cap {
                        Some(cap) => cap_graphemes(&entry.text, cap, "..."),
                        None => entry.text.clone(),
                    },
                    level: entry.level,
                    indent: Indent::for_level(entry.level),
                    marker: Marker::for_selected(selected),
                    selected,
                    focused: self.focus == Some(index),
                }
            })
            .collect()
    }

    /// Render rows as text lines no wider than `width` cells.
    #[must_use]
    pub fn render_lines(&self, tracker: &ScrollTracker, width: usize) -> Vec<String> {
        self.rows(tracker)
            .into_iter()
            .map(|row| {
                let line = format!(
                    "{:indent$}{} {}",
                    "",
                    row.marker.glyph(),
                    row.label,
                    indent = row.indent.columns()
                );
                truncate_with_ellipsis(&line, width, &self.ellipsis)
            })
            .collect()
    }

    /// Activate the row at `index` (click).
    pub fn activate<O: GeometryOracle>(
        &mut self,
        controller: &mut OutlineController<O>,
        index: usize,
    ) -> NavigationOutcome {
        self.activate_from(controller, index, "click")
    }

    /// Handle a key press.
    ///
    /// Enter and Space activate the focused row. Arrow keys, Home, and End
    /// move focus without touching the active entry. Returns the navigation
    /// outcome when a row was activated.
    pub fn handle_key<O: GeometryOracle>(
        &mut self,
        controller: &mut OutlineController<O>,
        key: KeyCode,
    ) -> Option<NavigationOutcome> {
        let len = controller.headings().len();
        match key {
            KeyCode::Enter | KeyCode::Char(' ') => {
                let index = self.focus?;
                Some(self.activate_from(controller, index, "keyboard"))
            }
            KeyCode::Up => {
                let next = self.focus.map_or(0, |i| i.saturating_sub(1));
                self.set_focus(Some(next), len);
                None
            }
            KeyCode::Down => {
                let next = self.focus.map_or(0, |i| i + 1);
                self.set_focus(Some(next), len);
                None
            }
            KeyCode::Home => {
                self.set_focus(Some(0), len);
                None
            }
            KeyCode::End => {
                self.set_focus(Some(len.saturating_sub(1)), len);
                None
            }
            KeyCode::Char(_) => None,
        }
    }

    fn activate_from<O: GeometryOracle>(
        &mut self,
        controller: &mut OutlineController<O>,
        index: usize,
        source: &str,
    ) -> NavigationOutcome {
        #[cfg(not(feature = "tracing"))]
        let _ = source;
        let Some(key) = controller.headings().key_at(index).cloned() else {
            return NavigationOutcome::Skipped(OutlineError::StaleIndex {
                index,
                len: controller.headings().len(),
            });
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "tocline.widgets",
            source,
            index,
            key = %key,
            "outline row activated"
        );
        let outcome = controller.select_heading(&key, index);
        if let Some(selected) = outcome.index() {
            self.focus = Some(selected);
        }
        outcome
    }
}
