use std::time::Instant;

use log::{debug, trace, warn};
use slotmap::SlotMap;

use crate::coords::Color;
use crate::input::{CursorPosition, CursorProvider};
use crate::surface::{Camera, Surface};
use crate::time::{FrameClock, FrameTime};

use super::behavior::BehaviorSlot;
use super::depth_index::DepthIndex;
use super::names::NameRegistry;
use super::pointer::HitTarget;
use super::render::DrawOutcome;
use super::{
    effective_depth, Behavior, BehaviorCtx, BehaviorId, Capabilities, Depth, DrawStats, Lifecycle,
    Node, NodeId, PointerBlockManager, QueueType, RenderDispatcher, Result, SceneConfig, SceneError,
};

/// Counters for one `Scene::update` call.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// `false` when the scene was unloaded or paused and nothing happened.
    pub ran: bool,
    pub started: usize,
    pub updated: usize,
    /// Nodes structurally removed by the cleanup sweep.
    pub swept: usize,
    pub hovered: Option<BehaviorId>,
}

/// A node tree plus everything needed to drive it one frame at a time.
///
/// # Frame
///
/// The host calls [`update`](Self::update) then [`render`](Self::render)
/// once per tick:
///
/// 1. update walk: pre-order, a node's behaviors in attach order before its
///    children, children in list order
/// 2. cleanup sweep of everything destroyed so far
/// 3. clock advance (scaled wall-clock delta)
/// 4. hover resolution over this frame's pointer registrants
/// 5. render: collect renderables, sort by effective depth, draw, clear
///
/// Destroying never unlinks anything mid-walk; removal only happens in step 2.
pub struct Scene {
    name: String,
    pub(crate) nodes: SlotMap<NodeId, Node>,
    pub(crate) behaviors: SlotMap<BehaviorId, BehaviorSlot>,
    pub(crate) root: NodeId,
    pub(crate) names: NameRegistry,
    pub(crate) depth_index: DepthIndex,
    pending_nodes: Vec<NodeId>,
    pending_behaviors: Vec<BehaviorId>,
    manual_render: Vec<BehaviorId>,
    render_queue: RenderDispatcher,
    pointer: PointerBlockManager,
    clock: FrameClock,
    time: FrameTime,
    camera: Camera,
    clear_color: Option<Color>,
    frame_serial: u64,
    loaded: bool,
    paused: bool,
    in_update: bool,
}

impl Scene {
    pub fn new(config: SceneConfig) -> Self {
        let mut nodes: SlotMap<NodeId, Node> = SlotMap::with_key();
        let root = nodes.insert(Node::new(None));

        let mut names = NameRegistry::default();
        nodes[root].name = names.register(&config.root_name, root);

        let mut depth_index = DepthIndex::default();
        depth_index.insert(root, Depth::default());

        let mut clock = FrameClock::with_clamps(config.dt_min, config.dt_max);
        clock.set_time_scale(config.time_scale);

        Self {
            name: config.name,
            nodes,
            behaviors: SlotMap::with_key(),
            root,
            names,
            depth_index,
            pending_nodes: Vec::new(),
            pending_behaviors: Vec::new(),
            manual_render: Vec::new(),
            render_queue: RenderDispatcher::new(),
            pointer: PointerBlockManager::new(),
            clock,
            time: FrameTime::zero(Instant::now()),
            camera: config.camera,
            clear_color: config.clear_color,
            frame_serial: 0,
            loaded: false,
            paused: false,
            in_update: false,
        }
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// While paused, `update` does nothing; `render` still draws.
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            self.paused = paused;
            if !paused {
                // Don't hand behaviors the whole pause as one delta.
                self.clock.reset();
            }
        }
    }

    /// Timing of the last completed frame.
    #[inline]
    pub fn time(&self) -> FrameTime {
        self.time
    }

    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.clock.time_scale()
    }

    pub fn set_time_scale(&mut self, scale: f32) {
        self.clock.set_time_scale(scale);
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[inline]
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Behavior that won the last hover resolution.
    #[inline]
    pub fn hovered(&self) -> Option<BehaviorId> {
        self.pointer.hovered()
    }

    /// Node owning the hovered behavior.
    pub fn hovered_node(&self) -> Option<NodeId> {
        self.hovered().and_then(|id| self.behavior_node(id))
    }

    #[inline]
    pub fn pointer(&self) -> &PointerBlockManager {
        &self.pointer
    }

    #[inline]
    pub fn render_queue(&self) -> &RenderDispatcher {
        &self.render_queue
    }

    /// Live node count, root included, pending-destroy nodes included.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn behavior_count(&self) -> usize {
        self.behaviors.len()
    }

    // ── load / unload ─────────────────────────────────────────────────────

    /// Swaps the scene in: fires `on_load` on every behavior that is not
    /// destroyed, enabled or not. No-op when already loaded.
    pub fn load(&mut self) {
        if self.loaded {
            return;
        }
        self.loaded = true;
        self.clock.reset();
        debug!("scene '{}' loaded ({} nodes)", self.name, self.nodes.len());

        for id in self.behaviors_in_tree_order() {
            if self.behaviors.get(id).is_some_and(|s| !s.is_destroyed()) {
                self.invoke(id, |b, ctx| b.on_load(ctx));
            }
        }
    }

    /// Swaps the scene out: fires `on_unload` like [`load`](Self::load) fires
    /// `on_load`, then drops this frame's queues and the hover winner.
    pub fn unload(&mut self) {
        if !self.loaded {
            return;
        }

        for id in self.behaviors_in_tree_order() {
            if self.behaviors.get(id).is_some_and(|s| !s.is_destroyed()) {
                self.invoke(id, |b, ctx| b.on_unload(ctx));
            }
        }

        self.loaded = false;
        self.pointer.reset();
        self.render_queue.clear();
        self.manual_render.clear();
        debug!("scene '{}' unloaded", self.name);
    }

    // ── frame ─────────────────────────────────────────────────────────────

    /// Runs one update frame. Does nothing when unloaded or paused.
    pub fn update(&mut self, cursor: &dyn CursorProvider) -> FrameStats {
        if !self.loaded || self.paused {
            return FrameStats::default();
        }
        if self.in_update {
            warn!("scene '{}': update called from inside update; ignored", self.name);
            return FrameStats::default();
        }

        let mut stats = FrameStats { ran: true, ..FrameStats::default() };

        self.in_update = true;
        self.frame_serial = self.frame_serial.wrapping_add(1);
        self.update_node(self.root, &mut stats);
        self.in_update = false;

        stats.swept = self.sweep_destroyed();
        self.time = self.clock.tick();

        let cursor = CursorPosition::resolve(cursor, &self.camera);
        let Self { nodes, behaviors, pointer, .. } = &mut *self;
        stats.hovered = pointer.resolve(cursor, |id| hit_target(nodes, behaviors, id));

        trace!(
            "scene '{}' frame {}: started {} updated {} swept {} hovered {:?}",
            self.name, self.time.frame_index, stats.started, stats.updated, stats.swept, stats.hovered
        );
        stats
    }

    /// Draws every queued renderable onto `surface`.
    ///
    /// Both render queues are empty when this returns.
    pub fn render(&mut self, surface: &mut dyn Surface) -> DrawStats {
        if let Some(color) = self.clear_color {
            surface.clear(color);
        }

        if self.loaded {
            self.collect_renderables();
        } else {
            self.manual_render.clear();
        }

        let Self { behaviors, render_queue, camera, .. } = &mut *self;
        let stats = render_queue.draw(camera, surface, |id, surface| draw_behavior(behaviors, id, surface));

        trace!(
            "scene '{}' render: world {} overlay {} hidden {}",
            self.name, stats.world, stats.overlay, stats.hidden
        );
        stats
    }

    /// Removes everything destroyed so far, outside of a frame.
    ///
    /// `update` already does this once per frame; hosts only need it for
    /// unloaded scenes. Returns the number of nodes removed.
    pub fn cleanup(&mut self) -> usize {
        if self.in_update {
            return 0;
        }
        self.sweep_destroyed()
    }

    fn update_node(&mut self, id: NodeId, stats: &mut FrameStats) {
        // Indices are re-read every step: hooks may append behaviors and
        // children, which are then visited in this same walk.
        let mut i = 0;
        loop {
            let Some(node) = self.nodes.get(id) else { return };
            if !node.is_active() {
                return;
            }
            let Some(&behavior) = node.behaviors.get(i) else { break };
            self.tick_behavior(behavior, stats);
            i += 1;
        }

        let mut i = 0;
        loop {
            let Some(node) = self.nodes.get(id) else { return };
            if !node.is_active() {
                return;
            }
            let Some(&child) = node.children.get(i) else { break };
            self.update_node(child, stats);
            i += 1;
        }
    }

    fn tick_behavior(&mut self, id: BehaviorId, stats: &mut FrameStats) {
        let serial = self.frame_serial;
        let Some(slot) = self.behaviors.get_mut(id) else { return };
        // A sibling reshuffle mid-walk must not tick anything twice.
        if !slot.is_live() || slot.last_tick == serial {
            return;
        }
        slot.last_tick = serial;

        match slot.lifecycle {
            Lifecycle::Attached => {
                // The first due tick starts instead of updating.
                slot.lifecycle = Lifecycle::Started;
                self.invoke(id, |b, ctx| b.start(ctx));
                stats.started += 1;
            }
            Lifecycle::Started => {
                if std::mem::take(&mut slot.resume_pending) {
                    self.invoke(id, |b, ctx| b.resume(ctx));
                    if !self.behaviors.get(id).is_some_and(BehaviorSlot::is_live) {
                        return;
                    }
                }
                self.invoke(id, |b, ctx| b.update(ctx));
                stats.updated += 1;
            }
            Lifecycle::Destroyed => {}
        }
    }

    fn collect_renderables(&mut self) {
        let Self { nodes, behaviors, render_queue, manual_render, root, .. } = &mut *self;

        let mut stack = vec![*root];
        while let Some(id) = stack.pop() {
            let Some(node) = nodes.get(id) else { continue };
            if !node.is_active() {
                continue;
            }

            for &b in &node.behaviors {
                let Some(slot) = behaviors.get_mut(b) else { continue };
                if !slot.is_live() || !slot.caps.contains(Capabilities::RENDERABLE) {
                    continue;
                }
                match render_target(node, slot) {
                    Some((queue, depth, true)) => render_queue.enqueue(b, queue, depth),
                    Some((_, _, false)) => {}
                    None => warn!("{} declared Renderable but no longer provides it", slot.type_name),
                }
            }

            stack.extend(node.children.iter().rev().copied());
        }

        // Explicit requests go after the walk; the dispatcher drops repeats.
        for b in manual_render.drain(..) {
            let Some(slot) = behaviors.get_mut(b) else { continue };
            if !slot.is_live() {
                continue;
            }
            let Some(node) = nodes.get(slot.node).filter(|n| n.is_active()) else { continue };
            if let Some((queue, depth, _)) = render_target(node, slot) {
                render_queue.enqueue(b, queue, depth);
            }
        }
    }

    fn sweep_destroyed(&mut self) -> usize {
        let mut removed = 0;

        for node in std::mem::take(&mut self.pending_nodes) {
            let Some(parent) = self.nodes.get(node).map(|n| n.parent) else { continue };
            if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(p)) {
                parent.children.retain(|&c| c != node);
            }
            removed += self.remove_subtree(node);
        }

        for behavior in std::mem::take(&mut self.pending_behaviors) {
            if let Some(slot) = self.behaviors.remove(behavior) {
                if let Some(node) = self.nodes.get_mut(slot.node) {
                    node.behaviors.retain(|&b| b != behavior);
                }
            }
        }

        if removed > 0 {
            debug!("scene '{}': swept {} destroyed nodes", self.name, removed);
        }
        removed
    }

    fn remove_subtree(&mut self, top: NodeId) -> usize {
        let mut removed = 0;
        let mut stack = vec![top];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.remove(id) else { continue };
            self.names.remove(&node.name, id);
            self.depth_index.remove(id, node.depth);
            for b in node.behaviors {
                self.behaviors.remove(b);
            }
            stack.extend(node.children);
            removed += 1;
        }
        removed
    }

    /// Every behavior id, pre-order, skipping nodes already marked destroyed.
    fn behaviors_in_tree_order(&self) -> Vec<BehaviorId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(id) else { continue };
            if node.pending_destroy {
                continue;
            }
            out.extend_from_slice(&node.behaviors);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    // ── behaviors ─────────────────────────────────────────────────────────

    /// Attaches `behavior` to `node` and fires its `on_attach` hook.
    ///
    /// The behavior is moved into the scene: it belongs to `node` for the rest
    /// of its life.
    pub fn add_behavior<B: Behavior>(&mut self, node: NodeId, behavior: B) -> Result<BehaviorId> {
        self.add_boxed_behavior(node, Box::new(behavior))
    }

    pub fn add_boxed_behavior(&mut self, node: NodeId, behavior: Box<dyn Behavior>) -> Result<BehaviorId> {
        let record = self.nodes.get_mut(node).ok_or(SceneError::UnknownNode(node))?;
        if record.pending_destroy {
            return Err(SceneError::NodeDestroyed(node));
        }

        let slot = BehaviorSlot::new(node, behavior);
        debug!("attach {} to '{}' (caps {:?})", slot.type_name, record.name, slot.caps);
        let id = self.behaviors.insert(slot);
        record.behaviors.push(id);

        self.invoke(id, |b, ctx| b.on_attach(ctx));
        Ok(id)
    }

    /// Enables or disables a behavior. Destroyed behaviors stay disabled;
    /// setting the current value again is a no-op.
    pub fn set_behavior_enabled(&mut self, id: BehaviorId, enabled: bool) -> Result<()> {
        let slot = self.behaviors.get_mut(id).ok_or(SceneError::UnknownBehavior(id))?;
        if slot.is_destroyed() || slot.enabled == enabled {
            return Ok(());
        }

        slot.enabled = enabled;
        if enabled && slot.lifecycle == Lifecycle::Started {
            slot.resume_pending = true;
        }
        Ok(())
    }

    /// Marks `node` and its whole subtree destroyed.
    ///
    /// Effects now: nodes disabled, `on_destroy` fired on each of their
    /// behaviors. Effects at the next sweep: unlinked, unnamed, unindexed,
    /// freed. Destroying twice is a no-op.
    pub fn destroy(&mut self, node: NodeId) -> Result<()> {
        if node == self.root {
            return Err(SceneError::RootNode);
        }
        let record = self.nodes.get(node).ok_or(SceneError::UnknownNode(node))?;
        if record.pending_destroy {
            return Ok(());
        }
        debug!("destroy '{}'", record.name);

        let mut doomed = Vec::new();
        for id in self.subtree(node) {
            if let Some(n) = self.nodes.get_mut(id) {
                n.pending_destroy = true;
                n.enabled = false;
                doomed.extend_from_slice(&n.behaviors);
            }
        }
        self.pending_nodes.push(node);

        for behavior in doomed {
            self.destroy_behavior_now(behavior);
        }
        Ok(())
    }

    /// Destroys a single behavior. Destroying twice is a no-op.
    pub fn destroy_behavior(&mut self, id: BehaviorId) -> Result<()> {
        let slot = self.behaviors.get(id).ok_or(SceneError::UnknownBehavior(id))?;
        if slot.is_destroyed() {
            return Ok(());
        }
        self.pending_behaviors.push(id);
        self.destroy_behavior_now(id);
        Ok(())
    }

    fn destroy_behavior_now(&mut self, id: BehaviorId) {
        let Some(slot) = self.behaviors.get_mut(id) else { return };
        if slot.is_destroyed() {
            return;
        }
        slot.lifecycle = Lifecycle::Destroyed;
        slot.enabled = false;
        slot.resume_pending = false;

        if slot.inner.is_none() {
            // Its own hook is running; `invoke` delivers on_destroy afterwards.
            slot.destroy_hook_due = true;
            return;
        }
        self.fire_on_destroy(id);
    }

    /// Requests a draw of `id` in the next render pass, for renderables that
    /// do not auto-queue.
    ///
    /// Fails with `MissingCapability` if the behavior is not `Renderable`.
    pub fn queue_render(&mut self, id: BehaviorId) -> Result<()> {
        self.require(id, Capabilities::RENDERABLE)?;
        if !self.manual_render.contains(&id) {
            self.manual_render.push(id);
        }
        Ok(())
    }

    /// Registers `id` for the current frame's hover resolution.
    ///
    /// Fails with `MissingCapability` if the behavior is not `PointerBlockable`.
    pub fn queue_pointer(&mut self, id: BehaviorId) -> Result<()> {
        self.require(id, Capabilities::POINTER_BLOCKABLE)?;
        self.pointer.queue(id);
        Ok(())
    }

    fn require(&self, id: BehaviorId, capability: Capabilities) -> Result<()> {
        let slot = self.behaviors.get(id).ok_or(SceneError::UnknownBehavior(id))?;
        if slot.caps.contains(capability) {
            Ok(())
        } else {
            Err(SceneError::MissingCapability { behavior: id, type_name: slot.type_name, capability })
        }
    }

    /// Runs `f` on behavior `id` with a context over this scene.
    ///
    /// The behavior is taken out of its slot for the call, so `f` may mutate
    /// the scene freely. Returns `None` if the behavior does not exist or is
    /// already running a hook.
    pub(crate) fn invoke<R>(
        &mut self,
        id: BehaviorId,
        f: impl FnOnce(&mut dyn Behavior, &mut BehaviorCtx<'_>) -> R,
    ) -> Option<R> {
        let slot = self.behaviors.get_mut(id)?;
        let node = slot.node;
        let mut inner = slot.inner.take()?;

        let out = {
            let mut ctx = BehaviorCtx::new(self, id, node);
            f(inner.as_mut(), &mut ctx)
        };

        // Slots are only freed by the sweep, which never runs inside a hook.
        let due = match self.behaviors.get_mut(id) {
            Some(slot) => {
                slot.inner = Some(inner);
                std::mem::take(&mut slot.destroy_hook_due)
            }
            None => false,
        };
        if due {
            self.fire_on_destroy(id);
        }

        Some(out)
    }

    // Kept out of `invoke` so the generic instantiation does not recurse.
    fn fire_on_destroy(&mut self, id: BehaviorId) {
        self.invoke(id, |b, ctx| b.on_destroy(ctx));
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}

/// Queue, effective depth and auto-queue flag of a renderable slot.
fn render_target(node: &Node, slot: &mut BehaviorSlot) -> Option<(QueueType, Depth, bool)> {
    let inner = slot.inner.as_mut()?;
    let depth = effective_depth(node.depth, inner.depth_offset());
    let queue = inner.queue_type();
    let renderable = inner.as_renderable()?;
    Some((queue, depth, renderable.auto_queue()))
}

fn draw_behavior(
    behaviors: &mut SlotMap<BehaviorId, BehaviorSlot>,
    id: BehaviorId,
    surface: &mut dyn Surface,
) -> DrawOutcome {
    let Some(renderable) = behaviors
        .get_mut(id)
        .and_then(|slot| slot.inner.as_mut())
        .and_then(|inner| inner.as_renderable())
    else {
        return DrawOutcome::Missing;
    };

    if !renderable.visible() {
        return DrawOutcome::Hidden;
    }
    renderable.on_render(surface);
    DrawOutcome::Drawn
}

fn hit_target(
    nodes: &SlotMap<NodeId, Node>,
    behaviors: &SlotMap<BehaviorId, BehaviorSlot>,
    id: BehaviorId,
) -> Option<HitTarget> {
    let slot = behaviors.get(id)?;
    if !slot.enabled || slot.is_destroyed() {
        return None;
    }
    let node = nodes.get(slot.node).filter(|n| n.is_active())?;
    let inner = slot.inner.as_deref()?;
    let blockable = inner.as_pointer_blockable()?;

    Some(HitTarget {
        depth: effective_depth(node.depth, inner.depth_offset()),
        space: inner.queue_type(),
        bounds: blockable.bounds(),
        blocks_mouse: blockable.blocks_mouse(),
    })
}
