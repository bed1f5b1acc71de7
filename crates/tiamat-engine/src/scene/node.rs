use super::{BehaviorId, Depth};

slotmap::new_key_type! {
    /// Stable handle to a node in a scene's arena.
    ///
    /// Handles of swept nodes never resolve again, even if the slot is reused.
    pub struct NodeId;
}

/// Arena record for one node.
///
/// Parents are plain handles and children are owned by position in the
/// parent's list, so back-references cannot form ownership cycles.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) name: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) behaviors: Vec<BehaviorId>,
    pub(crate) depth: Depth,
    pub(crate) enabled: bool,
    pub(crate) pending_destroy: bool,
}

impl Node {
    pub(crate) fn new(parent: Option<NodeId>) -> Self {
        Self {
            name: String::new(),
            parent,
            children: Vec::new(),
            behaviors: Vec::new(),
            depth: Depth::default(),
            enabled: true,
            pending_destroy: false,
        }
    }

    /// Registered, de-duplicated name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `None` only for the root.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in update/collection order.
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Attached behaviors in attach order, including destroyed ones that
    /// have not been swept yet.
    #[inline]
    pub fn behaviors(&self) -> &[BehaviorId] {
        &self.behaviors
    }

    #[inline]
    pub fn depth(&self) -> Depth {
        self.depth
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Marked for removal by the next cleanup sweep.
    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.pending_destroy
    }

    /// Enabled and not marked for removal.
    #[inline]
    pub(crate) fn is_active(&self) -> bool {
        self.enabled && !self.pending_destroy
    }
}
