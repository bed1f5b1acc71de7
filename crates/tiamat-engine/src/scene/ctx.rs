use crate::surface::Camera;
use crate::time::FrameTime;

use super::{BehaviorId, NodeId, Result, Scene};

/// What a behavior hook can see and do.
///
/// The behavior running the hook is checked out of the scene for the hook's
/// duration, so everything reachable through [`scene_mut`](Self::scene_mut)
/// is safe to mutate. Structural removal is still deferred: destroying
/// nodes here only marks them.
pub struct BehaviorCtx<'a> {
    scene: &'a mut Scene,
    behavior: BehaviorId,
    node: NodeId,
}

impl<'a> BehaviorCtx<'a> {
    pub(crate) fn new(scene: &'a mut Scene, behavior: BehaviorId, node: NodeId) -> Self {
        Self { scene, behavior, node }
    }

    #[inline]
    pub fn behavior_id(&self) -> BehaviorId {
        self.behavior
    }

    /// Node the behavior is attached to.
    #[inline]
    pub fn node_id(&self) -> NodeId {
        self.node
    }

    /// Timing of the previous completed frame.
    #[inline]
    pub fn time(&self) -> FrameTime {
        self.scene.time()
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        self.scene.camera()
    }

    #[inline]
    pub fn scene(&self) -> &Scene {
        &*self.scene
    }

    #[inline]
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut *self.scene
    }

    /// Enables or disables this behavior. Re-enabling fires `resume` before
    /// the next `update`.
    pub fn set_enabled(&mut self, enabled: bool) {
        // Our own slot cannot be swept while we run.
        let result = self.scene.set_behavior_enabled(self.behavior, enabled);
        debug_assert!(result.is_ok(), "running behavior missing from its scene: {result:?}");
    }

    /// Destroys this behavior; `on_destroy` runs as soon as the current hook returns.
    pub fn destroy_self(&mut self) {
        let result = self.scene.destroy_behavior(self.behavior);
        debug_assert!(result.is_ok(), "running behavior missing from its scene: {result:?}");
    }

    /// Destroys the owning node and everything below it.
    pub fn destroy_node(&mut self) -> Result<()> {
        self.scene.destroy(self.node)
    }

    /// Registers this behavior for this frame's hover resolution.
    pub fn queue_pointer(&mut self) -> Result<()> {
        self.scene.queue_pointer(self.behavior)
    }

    /// Requests a draw of this behavior in the next render pass.
    pub fn queue_render(&mut self) -> Result<()> {
        self.scene.queue_render(self.behavior)
    }

    /// `true` if this behavior won the last hover resolution.
    #[inline]
    pub fn is_hovered(&self) -> bool {
        self.scene.hovered() == Some(self.behavior)
    }
}
