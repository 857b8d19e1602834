#![forbid(unsafe_code)]

//! Synthetic document with deterministic geometry.
//!
//! [`SyntheticDocument`] stands in for a rendered page: headings sit at fixed
//! offsets from the top of the content, and a scroll offset moves the
//! viewport over them. A heading's top edge relative to the viewport is
//! `offset - scroll_top`. Headings can be detached to simulate nodes that
//! have been removed from the page but are still listed in the outline.
//!
//! The document also keeps the scroll listener registry, so it serves as both
//! the [`GeometryOracle`] and the [`ScrollSource`] of a controller.

use ahash::AHashMap;
use tocline_core::{
    GeometryOracle, GeometryUnavailable, HeadingEntry, HeadingKey, HeadingLevel, HeadingSequence,
    ListenerId, ScrollSource,
};

/// Where `scroll_into_view` puts the target heading.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ScrollAlign {
    /// Top edge at the viewport top.
    #[default]
    Start,
    /// Top edge this many units below the viewport top.
    Offset(f64),
}

impl ScrollAlign {
    fn inset(self) -> f64 {
        match self {
            Self::Start => 0.0,
            Self::Offset(dy) => dy,
        }
    }
}

#[derive(Debug, Clone)]
struct PlacedHeading {
    entry: HeadingEntry,
    offset: f64,
    attached: bool,
}

/// A page of headings at fixed offsets.
#[derive(Debug, Clone)]
pub struct SyntheticDocument {
    headings: Vec<PlacedHeading>,
    by_key: AHashMap<HeadingKey, usize>,
    content_height: f64,
    viewport_height: f64,
    scroll_top: f64,
    align: ScrollAlign,
    listeners: Vec<ListenerId>,
    next_listener: u64,
    subscribe_calls: u64,
}

impl SyntheticDocument {
    /// Empty document with the given viewport height.
    #[must_use]
    pub fn new(viewport_height: f64) -> Self {
        Self {
            headings: Vec::new(),
            by_key: AHashMap::new(),
            content_height: viewport_height,
            viewport_height,
            scroll_top: 0.0,
            align: ScrollAlign::Start,
            listeners: Vec::new(),
            next_listener: 0,
            subscribe_calls: 0,
        }
    }

    /// Document with `count` headings spaced `spacing` apart, alternating
    /// between second and third level.
    #[must_use]
    pub fn evenly_spaced(count: usize, spacing: f64, viewport_height: f64) -> Self {
        let mut doc = Self::new(viewport_height);
        for i in 0..count {
            let level = if i % 3 == 0 {
                HeadingLevel::H2
            } else {
                HeadingLevel::H3
            };
            doc.push_heading(
                HeadingEntry::new(format!("section-{i}"), format!("Section {i}"), level),
                i as f64 * spacing,
            );
        }
        doc.set_content_height(count as f64 * spacing + viewport_height);
        doc
    }

    /// Set the total content height, builder style.
    ///
    /// A height below `offset + viewport` leaves the heading at `offset`
    /// unable to reach the viewport top, as with the closing sections of a
    /// real page.
    #[must_use]
    pub fn with_content_height(mut self, height: f64) -> Self {
        self.set_content_height(height);
        self
    }

    /// Append a heading at `offset`. Offsets are expected in document order.
    ///
    /// The content grows to contain the heading but not to scroll it to the
    /// top; use [`set_content_height`](Self::set_content_height) for that.
    pub fn push_heading(&mut self, entry: HeadingEntry, offset: f64) {
        self.by_key.insert(entry.key.clone(), self.headings.len());
        self.content_height = self.content_height.max(offset);
        self.headings.push(PlacedHeading {
            entry,
            offset,
            attached: true,
        });
    }

    /// Set the total content height (scroll range is `content - viewport`).
    pub fn set_content_height(&mut self, height: f64) {
        self.content_height = height.max(self.viewport_height);
        self.scroll_top = self.scroll_top.min(self.max_scroll());
    }

    /// Set how `scroll_into_view` aligns its target.
    pub fn set_align(&mut self, align: ScrollAlign) {
        self.align = align;
    }

    /// Snapshot of the headings in document order.
    #[must_use]
    pub fn heading_sequence(&self) -> HeadingSequence {
        self.headings.iter().map(|h| h.entry.clone()).collect()
    }

    /// Current scroll offset.
    #[must_use]
    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    /// Largest scroll offset.
    #[must_use]
    pub fn max_scroll(&self) -> f64 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    /// Scroll to `top`, clamped to the scroll range.
    pub fn scroll_to(&mut self, top: f64) {
        self.scroll_top = top.clamp(0.0, self.max_scroll());
    }

    /// Scroll by `dy` (positive moves down the document).
    pub fn scroll_by(&mut self, dy: f64) {
        self.scroll_to(self.scroll_top + dy);
    }

    /// Offset of a heading from the top of the content.
    #[must_use]
    pub fn offset_of(&self, key: &HeadingKey) -> Option<f64> {
        self.by_key.get(key).map(|&i| self.headings[i].offset)
    }

    /// Remove a heading's node from the page. Returns `false` if unknown.
    pub fn detach(&mut self, key: &HeadingKey) -> bool {
        self.set_attached(key, false)
    }

    /// Put a detached heading back. Returns `false` if unknown.
    pub fn attach(&mut self, key: &HeadingKey) -> bool {
        self.set_attached(key, true)
    }

    fn set_attached(&mut self, key: &HeadingKey, attached: bool) -> bool {
        match self.by_key.get(key) {
            Some(&i) => {
                self.headings[i].attached = attached;
                true
            }
            None => false,
        }
    }

    /// Registered listeners.
    #[must_use]
    pub fn listeners(&self) -> &[ListenerId] {
        &self.listeners
    }

    /// Total `subscribe` calls since creation.
    #[must_use]
    pub fn subscribe_calls(&self) -> u64 {
        self.subscribe_calls
    }

    fn placed(&self, key: &HeadingKey) -> Result<&PlacedHeading, GeometryUnavailable> {
        self.by_key
            .get(key)
            .map(|&i| &self.headings[i])
            .filter(|h| h.attached)
            .ok_or_else(|| GeometryUnavailable::new(key.clone()))
    }
}

impl GeometryOracle for SyntheticDocument {
    fn top_edge(&self, key: &HeadingKey) -> Result<f64, GeometryUnavailable> {
        Ok(self.placed(key)?.offset - self.scroll_top)
    }

    fn scroll_into_view(&mut self, key: &HeadingKey) -> Result<(), GeometryUnavailable> {
        let offset = self.placed(key)?.offset;
        self.scroll_to(offset - self.align.inset());
        Ok(())
    }
}

impl ScrollSource for SyntheticDocument {
    fn subscribe(&mut self) -> ListenerId {
        self.next_listener += 1;
        self.subscribe_calls += 1;
        let id = ListenerId(self.next_listener);
        self.listeners.push(id);
        id
    }

    fn unsubscribe(&mut self, id: ListenerId) {
        self.listeners.retain(|l| *l != id);
    }
}
