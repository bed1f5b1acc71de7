use core::cmp::Ordering;

/// Integer depth key. Higher values are drawn later and hit-tested first.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct Depth(pub i32);

impl Depth {
    #[inline]
    pub const fn new(v: i32) -> Self {
        Self(v)
    }

    #[inline]
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Saturating offset, so extreme keys pin at the ends instead of wrapping.
    #[inline]
    pub const fn offset(self, by: i32) -> Self {
        Self(self.0.saturating_add(by))
    }
}

impl From<i32> for Depth {
    #[inline]
    fn from(v: i32) -> Self {
        Self(v)
    }
}

/// Effective depth of a behavior: its node's depth key plus its own offset.
///
/// The render dispatcher and the pointer manager both order by this value
/// and nothing else computes it, which is what keeps "drawn on top" and
/// "hovered first" in agreement.
#[inline]
pub const fn effective_depth(node_depth: Depth, behavior_offset: i32) -> Depth {
    node_depth.offset(behavior_offset)
}

/// Total order for queued behaviors within one frame.
///
/// 1) `depth` ascending
/// 2) `order` ascending (registration order within the frame)
///
/// Draw order walks this ascending; hit-testing walks it descending, so
/// among equal depths the last-drawn registrant is the first one tested.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SortKey {
    pub depth: Depth,
    pub order: u32,
}

impl SortKey {
    #[inline]
    pub const fn new(depth: Depth, order: u32) -> Self {
        Self { depth, order }
    }
}

impl Ord for SortKey {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.depth.cmp(&other.depth).then(self.order.cmp(&other.order))
    }
}

impl PartialOrd for SortKey {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
