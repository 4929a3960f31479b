use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stable handle of a pinned range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PinnedRangeId(u64);

impl PinnedRangeId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// User-committed candle range `[from_index, to_index)` with its own profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinnedRange {
    pub from_index: usize,
    pub to_index: usize,
}

impl PinnedRange {
    #[must_use]
    pub fn span(self) -> usize {
        self.to_index.saturating_sub(self.from_index)
    }

    #[must_use]
    pub fn contains(self, index: usize) -> bool {
        index >= self.from_index && index < self.to_index
    }
}

/// Owns the pinned ranges in insertion order.
///
/// Ranges are independent: overlaps are allowed and never merged.
#[derive(Debug, Clone, PartialEq)]
pub struct PinnedRangeManager {
    ranges: IndexMap<PinnedRangeId, PinnedRange>,
    next_id: u64,
    min_span: usize,
}

impl Default for PinnedRangeManager {
    fn default() -> Self {
        Self::new(2)
    }
}

impl PinnedRangeManager {
    #[must_use]
    pub fn new(min_span: usize) -> Self {
        Self {
            ranges: IndexMap::new(),
            next_id: 0,
            min_span: min_span.max(1),
        }
    }

    #[must_use]
    pub fn min_span(&self) -> usize {
        self.min_span
    }

    /// Adds a range; bounds may be given in either order.
    ///
    /// Returns `None` (no-op) when the span is below the minimum.
    pub fn add(&mut self, from_index: usize, to_index: usize) -> Option<PinnedRangeId> {
        let range = PinnedRange {
            from_index: from_index.min(to_index),
            to_index: from_index.max(to_index),
        };
        if range.span() < self.min_span {
            debug!(
                from_index = range.from_index,
                to_index = range.to_index,
                min_span = self.min_span,
                "rejected pinned range below minimum span"
            );
            return None;
        }

        let id = PinnedRangeId(self.next_id);
        self.next_id += 1;
        self.ranges.insert(id, range);
        debug!(id = id.raw(), ?range, "pinned range added");
        Some(id)
    }

    /// First range (insertion order) containing `index`.
    #[must_use]
    pub fn hit_test(&self, index: usize) -> Option<PinnedRangeId> {
        self.ranges
            .iter()
            .find(|(_, range)| range.contains(index))
            .map(|(id, _)| *id)
    }

    pub fn remove(&mut self, id: PinnedRangeId) -> Option<PinnedRange> {
        let removed = self.ranges.shift_remove(&id);
        if removed.is_some() {
            debug!(id = id.raw(), "pinned range removed");
        }
        removed
    }

    pub fn clear(&mut self) {
        self.ranges.clear();
    }

    /// Drops ranges that reach past `candle_count`.
    pub fn retain_within(&mut self, candle_count: usize) {
        self.ranges.retain(|_, range| range.to_index <= candle_count);
    }

    #[must_use]
    pub fn get(&self, id: PinnedRangeId) -> Option<PinnedRange> {
        self.ranges.get(&id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PinnedRangeId, PinnedRange)> + '_ {
        self.ranges.iter().map(|(id, range)| (*id, *range))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}
