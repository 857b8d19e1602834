#![forbid(unsafe_code)]

//! Heading snapshot types produced by the host document.
//!
//! A [`HeadingSequence`] is an immutable, document-ordered snapshot. Order is
//! semantically meaningful: it defines the direction of the cursor walk. The
//! host replaces the whole sequence when headings are added, removed, or
//! reordered; there is no incremental diff.

use std::fmt;
use std::sync::Arc;

use ahash::AHashMap;

/// Opaque identifier of a heading element in the host document.
///
/// Cheap to clone; the runtime copies the selected key on every cursor step.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HeadingKey(Arc<str>);

impl HeadingKey {
    /// Create a key from any string-like identifier.
    #[must_use]
    pub fn new(key: impl AsRef<str>) -> Self {
        Self(Arc::from(key.as_ref()))
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HeadingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HeadingKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for HeadingKey {
    fn from(key: String) -> Self {
        Self(Arc::from(key))
    }
}

impl AsRef<str> for HeadingKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Heading rank, `H1` being the outermost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    /// Numeric rank (1..=6).
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::H1 => 1,
            Self::H2 => 2,
            Self::H3 => 3,
            Self::H4 => 4,
            Self::H5 => 5,
            Self::H6 => 6,
        }
    }

    /// Parse a numeric rank.
    #[must_use]
    pub const fn from_rank(rank: u8) -> Option<Self> {
        match rank {
            1 => Some(Self::H1),
            2 => Some(Self::H2),
            3 => Some(Self::H3),
            4 => Some(Self::H4),
            5 => Some(Self::H5),
            6 => Some(Self::H6),
            _ => None,
        }
    }

    /// Parse a tag name such as `"h2"` (case-insensitive).
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        let digits = tag.strip_prefix('h').or_else(|| tag.strip_prefix('H'))?;
        let rank: u8 = digits.parse().ok()?;
        Self::from_rank(rank)
    }

    /// Lowercase tag name (`"h1"`..`"h6"`).
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::H4 => "h4",
            Self::H5 => "h5",
            Self::H6 => "h6",
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One outline entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingEntry {
    /// Identifier used to query geometry and to mark the selection.
    pub key: HeadingKey,
    /// Label shown in the outline.
    pub text: String,
    /// Heading rank, used for indentation.
    pub level: HeadingLevel,
}

impl HeadingEntry {
    /// Create a new entry.
    #[must_use]
    pub fn new(key: impl Into<HeadingKey>, text: impl Into<String>, level: HeadingLevel) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
            level,
        }
    }
}

/// Immutable, document-ordered snapshot of headings.
///
/// Clones share the underlying storage. Keys are expected to be unique; if the
/// host supplies duplicates, [`position_of`](Self::position_of) resolves to the
/// first occurrence.
#[derive(Debug, Clone, Default)]
pub struct HeadingSequence {
    entries: Arc<[HeadingEntry]>,
    index: Arc<AHashMap<HeadingKey, usize>>,
}

impl HeadingSequence {
    /// Build a snapshot from entries in document order.
    #[must_use]
    pub fn new(entries: Vec<HeadingEntry>) -> Self {
        let mut index = AHashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            index.entry(entry.key.clone()).or_insert(i);
        }
        Self {
            entries: entries.into(),
            index: Arc::new(index),
        }
    }

    /// An empty snapshot.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of headings.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the snapshot has no headings.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`, if in bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&HeadingEntry> {
        self.entries.get(index)
    }

    /// Key of the entry at `index`, if in bounds.
    #[inline]
    #[must_use]
    pub fn key_at(&self, index: usize) -> Option<&HeadingKey> {
        self.entries.get(index).map(|entry| &entry.key)
    }

    /// Index of the first entry carrying `key`.
    #[must_use]
    pub fn position_of(&self, key: &HeadingKey) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// Whether any entry carries `key`.
    #[must_use]
    pub fn contains_key(&self, key: &HeadingKey) -> bool {
        self.index.contains_key(key)
    }

    /// All entries in document order.
    #[must_use]
    pub fn entries(&self) -> &[HeadingEntry] {
        &self.entries
    }

    /// Iterate entries in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, HeadingEntry> {
        self.entries.iter()
    }

    /// Whether both values share the same underlying snapshot.
    #[must_use]
    pub fn same_snapshot(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }
}

impl FromIterator<HeadingEntry> for HeadingSequence {
    fn from_iter<I: IntoIterator<Item = HeadingEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a HeadingSequence {
    type Item = &'a HeadingEntry;
    type IntoIter = std::slice::Iter<'a, HeadingEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> HeadingSequence {
        HeadingSequence::new(vec![
            HeadingEntry::new("intro", "Introduction", HeadingLevel::H2),
            HeadingEntry::new("setup", "Setup", HeadingLevel::H3),
            HeadingEntry::new("usage", "Usage", HeadingLevel::H2),
        ])
    }

    #[test]
    fn empty_sequence_has_no_entries() {
        let seq = HeadingSequence::empty();
        assert!(seq.is_empty());
        assert_eq!(seq.len(), 0);
        assert!(seq.get(0).is_none());
        assert!(seq.key_at(0).is_none());
    }

    #[test]
    fn position_of_finds_keys() {
        let seq = sample();
        assert_eq!(seq.position_of(&"intro".into()), Some(0));
        assert_eq!(seq.position_of(&"usage".into()), Some(2));
        assert_eq!(seq.position_of(&"missing".into()), None);
    }

    #[test]
    fn duplicate_keys_resolve_to_first() {
        let seq = HeadingSequence::new(vec![
            HeadingEntry::new("a", "First", HeadingLevel::H2),
            HeadingEntry::new("a", "Second", HeadingLevel::H2),
        ]);
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.position_of(&"a".into()), Some(0));
    }

    #[test]
    fn clones_share_snapshot() {
        let seq = sample();
        let clone = seq.clone();
        assert!(seq.same_snapshot(&clone));
        assert!(!seq.same_snapshot(&sample()));
    }

    #[test]
    fn collect_preserves_order() {
        let seq: HeadingSequence = ["x", "y", "z"]
            .into_iter()
            .map(|k| HeadingEntry::new(k, k.to_uppercase(), HeadingLevel::H2))
            .collect();
        let keys: Vec<&str> = seq.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["x", "y", "z"]);
    }

    #[test]
    fn level_tag_round_trip() {
        assert_eq!(HeadingLevel::from_tag("h2"), Some(HeadingLevel::H2));
        assert_eq!(HeadingLevel::from_tag("H6"), Some(HeadingLevel::H6));
        assert_eq!(HeadingLevel::from_tag("h7"), None);
        assert_eq!(HeadingLevel::from_tag("p"), None);
        assert_eq!(HeadingLevel::H3.tag(), "h3");
        assert_eq!(HeadingLevel::H4.rank(), 4);
    }

    #[test]
    fn key_display_and_conversions() {
        let key = HeadingKey::from(String::from("node-17"));
        assert_eq!(key.to_string(), "node-17");
        assert_eq!(key.as_str(), "node-17");
        assert_eq!(key, HeadingKey::new("node-17"));
    }
}
