#![forbid(unsafe_code)]

//! Host capabilities: live geometry and the scroll event source.
//!
//! The tracker never measures layout itself. It asks a [`GeometryOracle`] for
//! a heading's current top edge each time it needs one, so the algorithm runs
//! unchanged against a real layout engine or a synthetic document.

use ahash::AHashMap;

use crate::error::GeometryUnavailable;
use crate::heading::HeadingKey;

/// Live element geometry provided by the host document.
pub trait GeometryOracle {
    /// Top edge of the heading's first visible rectangle, in viewport
    /// coordinates (0 = top of the visible area, growing downward).
    fn top_edge(&self, key: &HeadingKey) -> Result<f64, GeometryUnavailable>;

    /// Bring the heading into view. Alignment and animation are up to the
    /// host; the position may still be settling when this returns.
    fn scroll_into_view(&mut self, key: &HeadingKey) -> Result<(), GeometryUnavailable>;
}

impl<T: GeometryOracle + ?Sized> GeometryOracle for &mut T {
    fn top_edge(&self, key: &HeadingKey) -> Result<f64, GeometryUnavailable> {
        (**self).top_edge(key)
    }

    fn scroll_into_view(&mut self, key: &HeadingKey) -> Result<(), GeometryUnavailable> {
        (**self).scroll_into_view(key)
    }
}

impl<T: GeometryOracle + ?Sized> GeometryOracle for Box<T> {
    fn top_edge(&self, key: &HeadingKey) -> Result<f64, GeometryUnavailable> {
        (**self).top_edge(key)
    }

    fn scroll_into_view(&mut self, key: &HeadingKey) -> Result<(), GeometryUnavailable> {
        (**self).scroll_into_view(key)
    }
}

/// Handle for a registered scroll listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// The ambient viewport scroll signal.
///
/// A controller subscribes once per mount and unsubscribes on teardown.
pub trait ScrollSource {
    /// Register interest in scroll events.
    fn subscribe(&mut self) -> ListenerId;

    /// Drop a registration. Unknown ids are ignored.
    fn unsubscribe(&mut self, id: ListenerId);
}

/// Fixed positions keyed by heading, for hosts that already know their
/// geometry and for tests.
///
/// Keys without a position, or set to `None`, report
/// [`GeometryUnavailable`]. `scroll_into_view` shifts every position so the
/// target's top edge lands at 0.
#[derive(Debug, Clone, Default)]
pub struct PositionMap {
    positions: AHashMap<HeadingKey, Option<f64>>,
}

impl PositionMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or replace a heading's position.
    pub fn set(&mut self, key: impl Into<HeadingKey>, y: f64) {
        self.positions.insert(key.into(), Some(y));
    }

    /// Mark a heading as unmeasurable.
    pub fn detach(&mut self, key: impl Into<HeadingKey>) {
        self.positions.insert(key.into(), None);
    }

    /// Shift every measurable position by `dy` (positive scrolls content up).
    pub fn scroll_by(&mut self, dy: f64) {
        for y in self.positions.values_mut().flatten() {
            *y -= dy;
        }
    }
}

impl<K: Into<HeadingKey>> FromIterator<(K, f64)> for PositionMap {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, y) in iter {
            map.set(key, y);
        }
        map
    }
}

impl GeometryOracle for PositionMap {
    fn top_edge(&self, key: &HeadingKey) -> Result<f64, GeometryUnavailable> {
        self.positions
            .get(key)
            .copied()
            .flatten()
            .ok_or_else(|| GeometryUnavailable::new(key.clone()))
    }

    fn scroll_into_view(&mut self, key: &HeadingKey) -> Result<(), GeometryUnavailable> {
        let y = self.top_edge(key)?;
        self.scroll_by(y);
        Ok(())
    }
}
