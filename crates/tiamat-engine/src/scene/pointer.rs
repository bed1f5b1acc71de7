use std::collections::HashSet;

use crate::coords::Rect;
use crate::input::CursorPosition;

use super::{BehaviorId, Depth, QueueType, SortKey};

/// Live hit-test data for one registrant, read when the frame is resolved.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct HitTarget {
    pub(crate) depth: Depth,
    pub(crate) space: QueueType,
    pub(crate) bounds: Rect,
    pub(crate) blocks_mouse: bool,
}

/// Topmost-wins hover resolution without a depth buffer.
///
/// Behaviors register during the update walk; at the end of the frame the
/// registrants are sorted by effective depth, highest first, and the first
/// one whose bounds contain the cursor becomes the hovered behavior. The
/// registration list never outlives the frame.
#[derive(Debug, Default)]
pub struct PointerBlockManager {
    registrants: Vec<(BehaviorId, u32)>,
    queued: HashSet<BehaviorId>,
    next_order: u32,
    hovered: Option<BehaviorId>,
    cursor: Option<CursorPosition>,
}

impl PointerBlockManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Winner of the last resolved frame.
    #[inline]
    pub fn hovered(&self) -> Option<BehaviorId> {
        self.hovered
    }

    /// Cursor used by the last resolved frame.
    #[inline]
    pub fn cursor(&self) -> Option<CursorPosition> {
        self.cursor
    }

    /// Registrants waiting for this frame's resolution.
    #[inline]
    pub fn pending(&self) -> usize {
        self.registrants.len()
    }

    /// Registers `behavior` for this frame. Repeats within a frame are ignored.
    pub(crate) fn queue(&mut self, behavior: BehaviorId) {
        if !self.queued.insert(behavior) {
            return;
        }
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);
        self.registrants.push((behavior, order));
    }

    /// Picks this frame's hovered behavior and clears the registrations.
    ///
    /// `lookup` returns `None` for registrants that no longer exist or are no
    /// longer hit-testable; those are skipped. Registrants that do not block
    /// the mouse are skipped too.
    pub(crate) fn resolve<F>(&mut self, cursor: Option<CursorPosition>, mut lookup: F) -> Option<BehaviorId>
    where
        F: FnMut(BehaviorId) -> Option<HitTarget>,
    {
        self.cursor = cursor;
        self.hovered = cursor.and_then(|cursor| {
            let mut candidates: Vec<(SortKey, BehaviorId, HitTarget)> = self
                .registrants
                .iter()
                .filter_map(|&(id, order)| lookup(id).map(|p| (SortKey::new(p.depth, order), id, p)))
                .collect();

            // Topmost first. Ties: later registration wins, mirroring draw order.
            candidates.sort_unstable_by(|a, b| b.0.cmp(&a.0));

            candidates
                .into_iter()
                .filter(|(_, _, p)| p.blocks_mouse)
                .find(|(_, _, p)| {
                    let point = match p.space {
                        QueueType::World => cursor.world,
                        QueueType::Overlay => cursor.screen,
                    };
                    p.bounds.contains(point)
                })
                .map(|(_, id, _)| id)
        });

        self.clear();
        self.hovered
    }

    /// Drops registrations without touching the last winner.
    pub(crate) fn clear(&mut self) {
        self.registrants.clear();
        self.queued.clear();
        self.next_order = 0;
    }

    /// Forgets the last winner as well (scene unload).
    pub(crate) fn reset(&mut self) {
        self.clear();
        self.hovered = None;
        self.cursor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use slotmap::SlotMap;
    use std::collections::HashMap;

    fn ids(n: usize) -> Vec<BehaviorId> {
        let mut arena: SlotMap<BehaviorId, ()> = SlotMap::with_key();
        (0..n).map(|_| arena.insert(())).collect()
    }

    fn target(depth: i32, space: QueueType, bounds: Rect) -> HitTarget {
        HitTarget { depth: Depth(depth), space, bounds, blocks_mouse: true }
    }

    fn cursor_at(screen: Vec2, world: Vec2) -> Option<CursorPosition> {
        Some(CursorPosition { screen, world })
    }

    fn big() -> Rect {
        Rect::new(0.0, 0.0, 100.0, 100.0)
    }

    // ── winner selection ──────────────────────────────────────────────────

    #[test]
    fn highest_depth_containing_cursor_wins() {
        let ids = ids(3);
        let targets: HashMap<_, _> = [
            (ids[0], target(1, QueueType::World, big())),
            (ids[1], target(9, QueueType::World, Rect::new(500.0, 500.0, 1.0, 1.0))),
            (ids[2], target(4, QueueType::World, big())),
        ]
        .into_iter()
        .collect();

        let mut pointer = PointerBlockManager::new();
        for &id in &ids {
            pointer.queue(id);
        }
        let hovered = pointer.resolve(cursor_at(Vec2::new(10.0, 10.0), Vec2::new(10.0, 10.0)), |id| {
            targets.get(&id).copied()
        });

        // ids[1] is topmost but does not contain the cursor.
        assert_eq!(hovered, Some(ids[2]));
        assert_eq!(pointer.pending(), 0);
    }

    #[test]
    fn space_selects_screen_or_world_cursor() {
        let ids = ids(2);
        let screen_only = Rect::new(0.0, 0.0, 10.0, 10.0);
        let world_only = Rect::new(200.0, 200.0, 10.0, 10.0);
        let cursor = cursor_at(Vec2::new(5.0, 5.0), Vec2::new(205.0, 205.0));

        let mut pointer = PointerBlockManager::new();

        // The overlay registrant is tested first but checks the screen cursor,
        // which is outside `world_only`.
        pointer.queue(ids[0]);
        pointer.queue(ids[1]);
        let hovered = pointer.resolve(cursor, |id| {
            Some(if id == ids[0] {
                target(5, QueueType::Overlay, world_only)
            } else {
                target(0, QueueType::World, world_only)
            })
        });
        assert_eq!(hovered, Some(ids[1]));

        pointer.queue(ids[0]);
        let hovered = pointer.resolve(cursor, |_| Some(target(0, QueueType::Overlay, screen_only)));
        assert_eq!(hovered, Some(ids[0]));
    }

    #[test]
    fn equal_depth_prefers_later_registration() {
        let ids = ids(3);
        let mut pointer = PointerBlockManager::new();
        for &id in &ids {
            pointer.queue(id);
        }
        let hovered = pointer.resolve(cursor_at(Vec2::zero(), Vec2::new(1.0, 1.0)), |_| {
            Some(target(0, QueueType::World, big()))
        });
        assert_eq!(hovered, Some(ids[2]));
    }

    #[test]
    fn non_blocking_registrant_lets_cursor_through() {
        let ids = ids(2);
        let mut pointer = PointerBlockManager::new();
        pointer.queue(ids[0]);
        pointer.queue(ids[1]);
        let hovered = pointer.resolve(cursor_at(Vec2::zero(), Vec2::new(1.0, 1.0)), |id| {
            let mut p = target(if id == ids[0] { 10 } else { 0 }, QueueType::World, big());
            p.blocks_mouse = id != ids[0];
            Some(p)
        });
        assert_eq!(hovered, Some(ids[1]));
    }

    // ── frame lifetime ────────────────────────────────────────────────────

    #[test]
    fn no_cursor_or_no_hit_unsets_hover() {
        let ids = ids(1);
        let mut pointer = PointerBlockManager::new();

        pointer.queue(ids[0]);
        let all = |_: BehaviorId| Some(target(0, QueueType::World, big()));
        assert_eq!(pointer.resolve(cursor_at(Vec2::zero(), Vec2::new(1.0, 1.0)), all), Some(ids[0]));

        pointer.queue(ids[0]);
        assert_eq!(pointer.resolve(None, all), None);
        assert_eq!(pointer.pending(), 0);

        // Nobody registered this frame: nothing can be hovered.
        assert_eq!(pointer.resolve(cursor_at(Vec2::zero(), Vec2::new(1.0, 1.0)), all), None);
    }

    #[test]
    fn vanished_registrant_is_skipped() {
        let ids = ids(2);
        let mut pointer = PointerBlockManager::new();
        pointer.queue(ids[0]);
        pointer.queue(ids[1]);
        let gone = ids[1];
        let hovered = pointer.resolve(cursor_at(Vec2::zero(), Vec2::new(1.0, 1.0)), |id| {
            (id != gone).then(|| target(0, QueueType::World, big()))
        });
        assert_eq!(hovered, Some(ids[0]));
    }

    #[test]
    fn duplicate_queue_is_ignored() {
        let ids = ids(1);
        let mut pointer = PointerBlockManager::new();
        pointer.queue(ids[0]);
        pointer.queue(ids[0]);
        assert_eq!(pointer.pending(), 1);
    }
}
