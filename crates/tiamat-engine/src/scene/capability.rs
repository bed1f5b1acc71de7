use crate::coords::Rect;
use crate::surface::Surface;

use super::Behavior;

bitflags::bitflags! {
    /// Capabilities a behavior declared when it was attached.
    ///
    /// Detected once in `Scene::add_behavior`; the per-frame loops filter on
    /// these bits and never ask non-capable behaviors anything.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
    pub struct Capabilities: u8 {
        const RENDERABLE        = 1 << 0;
        const POINTER_BLOCKABLE = 1 << 1;
    }
}

impl Capabilities {
    pub(crate) fn detect(behavior: &mut dyn Behavior) -> Self {
        let mut caps = Self::empty();
        if behavior.as_renderable().is_some() {
            caps |= Self::RENDERABLE;
        }
        if behavior.as_pointer_blockable().is_some() {
            caps |= Self::POINTER_BLOCKABLE;
        }
        caps
    }
}

/// Which render queue / cursor space a behavior belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum QueueType {
    /// Drawn under the camera view; hit-tested against the world cursor.
    #[default]
    World,
    /// Drawn under the identity view after the world; hit-tested against the
    /// screen cursor.
    Overlay,
}

/// Behaviors that draw.
///
/// Ordering uses [`Behavior::depth_offset`] on top of the node depth; the
/// queue comes from [`Behavior::queue_type`].
pub trait Renderable {
    /// Hidden renderables keep their queue slot but are not drawn.
    fn visible(&self) -> bool {
        true
    }

    /// When `true` the scene queues this behavior every frame by itself.
    /// Otherwise it is drawn only in frames where it was queued explicitly.
    fn auto_queue(&self) -> bool {
        true
    }

    fn on_render(&mut self, surface: &mut dyn Surface);
}

/// Behaviors that take part in topmost-wins cursor hit-testing.
///
/// Participation is per frame: call `BehaviorCtx::queue_pointer` from
/// `update` in every frame the behavior should be hoverable. Bounds are in
/// the space of [`Behavior::queue_type`]: world units for `World`, screen
/// pixels for `Overlay`.
pub trait PointerBlockable {
    /// Hit area, queried when the frame's winner is resolved.
    fn bounds(&self) -> Rect;

    /// Non-blocking registrants are passed over, letting the cursor reach
    /// whatever is below them.
    fn blocks_mouse(&self) -> bool {
        true
    }
}
