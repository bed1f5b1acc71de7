use std::any::Any;

use super::{BehaviorCtx, Capabilities, NodeId, PointerBlockable, QueueType, Renderable};

slotmap::new_key_type! {
    /// Stable handle to a behavior attached somewhere in a scene.
    pub struct BehaviorId;
}

/// Upcast helper so `dyn Behavior` can be downcast to its concrete type.
///
/// Blanket-implemented; behavior authors never implement it by hand.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A unit of logic attached to exactly one node.
///
/// Every hook has a no-op default. Hooks receive a [`BehaviorCtx`] that
/// exposes the owning scene; while a hook runs, the behavior itself is
/// checked out of the scene, so typed lookups from inside a hook do not
/// see the caller.
///
/// # Lifecycle
///
/// ```text
/// Attached ──first due tick──▶ Started ──▶ { Enabled ⇄ Disabled } ──▶ Destroyed
/// ```
///
/// - `on_attach` fires inside `Scene::add_behavior`.
/// - The first due update tick calls `start` **instead of** `update`; the
///   first `update` arrives one frame later.
/// - Disabled behaviors are not ticked. Re-enabling a started behavior fires
///   `resume` right before its next `update`.
/// - `on_destroy` fires once; after it nothing else is called.
/// - `on_load`/`on_unload` follow the owning scene being swapped in and out
///   by the host, regardless of the enabled flag.
pub trait Behavior: AsAny {
    fn on_attach(&mut self, _ctx: &mut BehaviorCtx<'_>) {}

    fn start(&mut self, _ctx: &mut BehaviorCtx<'_>) {}

    fn update(&mut self, _ctx: &mut BehaviorCtx<'_>) {}

    fn resume(&mut self, _ctx: &mut BehaviorCtx<'_>) {}

    fn on_destroy(&mut self, _ctx: &mut BehaviorCtx<'_>) {}

    fn on_load(&mut self, _ctx: &mut BehaviorCtx<'_>) {}

    fn on_unload(&mut self, _ctx: &mut BehaviorCtx<'_>) {}

    /// Added to the node depth to form the effective depth.
    fn depth_offset(&self) -> i32 {
        0
    }

    /// Render queue this behavior draws in, and the cursor space it is
    /// hit-tested in.
    fn queue_type(&self) -> QueueType {
        QueueType::World
    }

    /// Returns `Some` if this behavior draws.
    ///
    /// Detected once at attach time; must answer the same way for the
    /// behavior's whole life.
    fn as_renderable(&mut self) -> Option<&mut dyn Renderable> {
        None
    }

    /// Returns `Some` if this behavior takes part in hit-testing.
    ///
    /// Detected once at attach time; must answer the same way for the
    /// behavior's whole life.
    fn as_pointer_blockable(&self) -> Option<&dyn PointerBlockable> {
        None
    }

    /// Name used in logs and errors.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

pub(crate) fn downcast_ref<T: Behavior>(behavior: &dyn Behavior) -> Option<&T> {
    AsAny::as_any(behavior).downcast_ref::<T>()
}

pub(crate) fn downcast_mut<T: Behavior>(behavior: &mut dyn Behavior) -> Option<&mut T> {
    AsAny::as_any_mut(behavior).downcast_mut::<T>()
}

/// Lifecycle state of an attached behavior.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    Attached,
    Started,
    Destroyed,
}

/// Arena record for one behavior.
pub(crate) struct BehaviorSlot {
    /// Set once at attach and never changed.
    pub(crate) node: NodeId,
    pub(crate) lifecycle: Lifecycle,
    pub(crate) enabled: bool,
    pub(crate) resume_pending: bool,
    /// Destroyed while its own hook was running; `on_destroy` is owed.
    pub(crate) destroy_hook_due: bool,
    /// Serial of the last update frame that ticked this behavior.
    pub(crate) last_tick: u64,
    pub(crate) caps: Capabilities,
    pub(crate) type_name: &'static str,
    /// `None` while one of the behavior's hooks is running.
    pub(crate) inner: Option<Box<dyn Behavior>>,
}

impl BehaviorSlot {
    pub(crate) fn new(node: NodeId, mut behavior: Box<dyn Behavior>) -> Self {
        let caps = Capabilities::detect(behavior.as_mut());
        let type_name = behavior.type_name();
        Self {
            node,
            lifecycle: Lifecycle::Attached,
            enabled: true,
            resume_pending: false,
            destroy_hook_due: false,
            last_tick: 0,
            caps,
            type_name,
            inner: Some(behavior),
        }
    }

    #[inline]
    pub(crate) fn is_destroyed(&self) -> bool {
        self.lifecycle == Lifecycle::Destroyed
    }

    /// Enabled, not destroyed, and not currently checked out.
    #[inline]
    pub(crate) fn is_live(&self) -> bool {
        self.enabled && !self.is_destroyed() && self.inner.is_some()
    }
}
