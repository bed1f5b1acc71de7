use std::collections::{HashMap, HashSet};

use super::{Depth, NodeId};

/// Depth key → nodes currently at that key.
///
/// Only answers "who else is at this depth"; ordering never reads it.
/// Empty buckets are dropped so the map only holds occupied depths.
#[derive(Debug, Default)]
pub(crate) struct DepthIndex {
    buckets: HashMap<Depth, HashSet<NodeId>>,
}

impl DepthIndex {
    pub(crate) fn insert(&mut self, node: NodeId, depth: Depth) {
        self.buckets.entry(depth).or_default().insert(node);
    }

    pub(crate) fn remove(&mut self, node: NodeId, depth: Depth) {
        if let Some(bucket) = self.buckets.get_mut(&depth) {
            bucket.remove(&node);
            if bucket.is_empty() {
                self.buckets.remove(&depth);
            }
        }
    }

    /// Moves `node` from `from` to `to`. Callers update the node record in
    /// the same step so the two never disagree.
    pub(crate) fn relocate(&mut self, node: NodeId, from: Depth, to: Depth) {
        if from == to {
            return;
        }
        self.insert(node, to);
        self.remove(node, from);
    }

    pub(crate) fn nodes_at(&self, depth: Depth) -> impl Iterator<Item = NodeId> + '_ {
        self.buckets.get(&depth).into_iter().flat_map(|b| b.iter().copied())
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, node: NodeId, depth: Depth) -> bool {
        self.buckets.get(&depth).is_some_and(|b| b.contains(&node))
    }

    /// Number of distinct occupied depths.
    #[cfg(test)]
    pub(crate) fn occupied(&self) -> usize {
        self.buckets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn relocate_moves_between_buckets() {
        let mut arena: SlotMap<NodeId, ()> = SlotMap::with_key();
        let a = arena.insert(());
        let b = arena.insert(());

        let mut index = DepthIndex::default();
        index.insert(a, Depth(0));
        index.insert(b, Depth(0));
        index.relocate(a, Depth(0), Depth(5));

        assert!(index.contains(a, Depth(5)));
        assert!(!index.contains(a, Depth(0)));
        assert_eq!(index.nodes_at(Depth(0)).collect::<Vec<_>>(), vec![b]);
        assert_eq!(index.occupied(), 2);
    }

    #[test]
    fn emptied_bucket_is_dropped() {
        let mut arena: SlotMap<NodeId, ()> = SlotMap::with_key();
        let a = arena.insert(());

        let mut index = DepthIndex::default();
        index.insert(a, Depth(3));
        index.remove(a, Depth(3));
        assert_eq!(index.occupied(), 0);
        assert_eq!(index.nodes_at(Depth(3)).count(), 0);
    }
}
