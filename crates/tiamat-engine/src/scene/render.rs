use std::collections::HashSet;

use crate::surface::{Camera, Surface, View};

use super::{BehaviorId, Depth, QueueType, SortKey};

/// Outcome of drawing one queued behavior.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum DrawOutcome {
    Drawn,
    Hidden,
    /// The behavior vanished or stopped answering as a renderable.
    Missing,
}

/// Counters for one draw pass.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub world: usize,
    pub overlay: usize,
    /// Queued but not drawn because `visible()` was false.
    pub hidden: usize,
}

impl DrawStats {
    #[inline]
    pub fn drawn(&self) -> usize {
        self.world + self.overlay
    }
}

#[derive(Debug, Copy, Clone)]
struct RenderEntry {
    behavior: BehaviorId,
    key: SortKey,
}

/// Two one-frame render queues.
///
/// Filled by the scene's collection walk (and explicit `queue_render`
/// calls), sorted by [`SortKey`], drawn, then emptied. Nothing survives
/// from one draw pass to the next.
#[derive(Debug, Default)]
pub struct RenderDispatcher {
    world: Vec<RenderEntry>,
    overlay: Vec<RenderEntry>,
    queued: HashSet<BehaviorId>,
    next_order: u32,
}

impl RenderDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries waiting in `queue`.
    pub fn len(&self, queue: QueueType) -> usize {
        match queue {
            QueueType::World => self.world.len(),
            QueueType::Overlay => self.overlay.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.world.is_empty() && self.overlay.is_empty()
    }

    /// Queues `behavior` at `depth`. A behavior is queued at most once per
    /// frame; repeats are ignored.
    pub(crate) fn enqueue(&mut self, behavior: BehaviorId, queue: QueueType, depth: Depth) {
        if !self.queued.insert(behavior) {
            return;
        }

        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);

        let entry = RenderEntry { behavior, key: SortKey::new(depth, order) };
        match queue {
            QueueType::World => self.world.push(entry),
            QueueType::Overlay => self.overlay.push(entry),
        }
    }

    /// Sorts and draws both queues, then clears them.
    ///
    /// World entries are drawn under `camera.view()`, overlay entries under
    /// the identity view afterwards, so overlays always cover the world.
    /// Both views are pushed and popped; the caller's view stack is left as
    /// it was.
    pub(crate) fn draw<F>(&mut self, camera: &Camera, surface: &mut dyn Surface, mut draw_one: F) -> DrawStats
    where
        F: FnMut(BehaviorId, &mut dyn Surface) -> DrawOutcome,
    {
        let mut stats = DrawStats::default();

        self.world.sort_unstable_by_key(|e| e.key);
        self.overlay.sort_unstable_by_key(|e| e.key);

        surface.push_view(camera.view());
        for entry in &self.world {
            match draw_one(entry.behavior, &mut *surface) {
                DrawOutcome::Drawn => stats.world += 1,
                DrawOutcome::Hidden => stats.hidden += 1,
                DrawOutcome::Missing => {}
            }
        }
        surface.pop_view();

        surface.push_view(View::identity());
        for entry in &self.overlay {
            match draw_one(entry.behavior, &mut *surface) {
                DrawOutcome::Drawn => stats.overlay += 1,
                DrawOutcome::Hidden => stats.hidden += 1,
                DrawOutcome::Missing => {}
            }
        }
        surface.pop_view();

        self.clear();
        stats
    }

    /// Drops everything queued so far.
    pub(crate) fn clear(&mut self) {
        self.world.clear();
        self.overlay.clear();
        self.queued.clear();
        self.next_order = 0;
    }
}
