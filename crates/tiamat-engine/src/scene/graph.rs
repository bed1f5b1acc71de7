//! Tree structure, naming, depth and typed lookups on [`Scene`].

use log::debug;

use super::behavior::{downcast_mut, downcast_ref};
use super::{Behavior, BehaviorId, Capabilities, Depth, Lifecycle, Node, NodeId, Result, Scene, SceneError};

impl Scene {
    // ── nodes ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    #[inline]
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Creates a node under the root.
    ///
    /// `name` is de-duplicated: a second "Foo" becomes "Foo 1", a third
    /// "Foo 2", always taking the lowest free suffix.
    pub fn create_node(&mut self, name: &str) -> NodeId {
        self.insert_node(self.root, name)
    }

    /// Creates a node under `parent`.
    pub fn create_child(&mut self, parent: NodeId, name: &str) -> Result<NodeId> {
        let record = self.nodes.get(parent).ok_or(SceneError::UnknownNode(parent))?;
        if record.pending_destroy {
            return Err(SceneError::NodeDestroyed(parent));
        }
        Ok(self.insert_node(parent, name))
    }

    fn insert_node(&mut self, parent: NodeId, name: &str) -> NodeId {
        let id = self.nodes.insert(Node::new(Some(parent)));
        let name = self.names.register(name, id);
        self.depth_index.insert(id, Depth::default());
        self.nodes[parent].children.push(id);
        debug!("create node '{name}'");
        self.nodes[id].name = name;
        id
    }

    /// Moves `child` (with its subtree) under `parent`, appending it last.
    ///
    /// Re-adding a child to its current parent is a no-op. Refuses anything
    /// that would break the tree: the root as a child, a node under itself,
    /// a parent under its own child, or any deeper cycle.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let parent_record = self.nodes.get(parent).ok_or(SceneError::UnknownNode(parent))?;
        let child_record = self.nodes.get(child).ok_or(SceneError::UnknownNode(child))?;

        if child == self.root {
            return Err(SceneError::RootNode);
        }
        if child == parent {
            return Err(SceneError::ReparentToSelf(child));
        }
        if parent_record.parent == Some(child) {
            return Err(SceneError::ReparentToParent { parent, child });
        }
        if self.is_ancestor(child, parent) {
            return Err(SceneError::ReparentToDescendant { parent, child });
        }
        if parent_record.pending_destroy {
            return Err(SceneError::NodeDestroyed(parent));
        }
        if child_record.pending_destroy {
            return Err(SceneError::NodeDestroyed(child));
        }

        let old_parent = child_record.parent;
        if old_parent == Some(parent) {
            return Ok(());
        }

        if let Some(old) = old_parent.and_then(|p| self.nodes.get_mut(p)) {
            old.children.retain(|&c| c != child);
        }
        self.nodes[parent].children.push(child);
        self.nodes[child].parent = Some(parent);
        debug!("reparent '{}' under '{}'", self.nodes[child].name, self.nodes[parent].name);
        Ok(())
    }

    /// `true` if `ancestor` is a strict ancestor of `node`.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = self.nodes.get(node).and_then(|n| n.parent);
        while let Some(id) = cursor {
            if id == ancestor {
                return true;
            }
            cursor = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// First descendant of `node` named `name`, depth-first pre-order.
    ///
    /// `node` itself is not a candidate. Destroyed subtrees are skipped.
    pub fn find_descendant(&self, node: NodeId, name: &str) -> Option<NodeId> {
        let start = self.nodes.get(node)?;
        let mut stack: Vec<NodeId> = start.children.iter().rev().copied().collect();

        while let Some(id) = stack.pop() {
            let Some(n) = self.nodes.get(id) else { continue };
            if n.pending_destroy {
                continue;
            }
            if n.name == name {
                return Some(id);
            }
            stack.extend(n.children.iter().rev().copied());
        }
        None
    }

    /// Scene-wide lookup by exact registered name.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.names
            .get(name)
            .filter(|&id| self.nodes.get(id).is_some_and(|n| !n.pending_destroy))
    }

    /// Sets a node's draw/hit-test depth and moves it between depth buckets.
    pub fn set_depth(&mut self, node: NodeId, depth: impl Into<Depth>) -> Result<()> {
        let depth = depth.into();
        let record = self.nodes.get_mut(node).ok_or(SceneError::UnknownNode(node))?;
        let old = record.depth;
        if old != depth {
            record.depth = depth;
            self.depth_index.relocate(node, old, depth);
        }
        Ok(())
    }

    /// Nodes whose depth is exactly `depth`, in no particular order.
    pub fn nodes_at_depth(&self, depth: impl Into<Depth>) -> impl Iterator<Item = NodeId> + '_ {
        self.depth_index.nodes_at(depth.into())
    }

    /// Disabled nodes are skipped, with their whole subtree, by the update
    /// walk and render collection. Destroyed nodes stay disabled.
    pub fn set_node_enabled(&mut self, node: NodeId, enabled: bool) -> Result<()> {
        let record = self.nodes.get_mut(node).ok_or(SceneError::UnknownNode(node))?;
        if !record.pending_destroy {
            record.enabled = enabled;
        }
        Ok(())
    }

    /// Every node in `top`'s subtree, `top` first, pre-order.
    pub(crate) fn subtree(&self, top: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![top];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(id) else { continue };
            out.push(id);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    // ── behaviors ─────────────────────────────────────────────────────────

    /// First non-destroyed behavior of type `T` on `node`.
    pub fn find_behavior<T: Behavior>(&self, node: NodeId) -> Option<BehaviorId> {
        self.nodes.get(node)?.behaviors.iter().copied().find(|&id| {
            self.behaviors.get(id).is_some_and(|slot| {
                !slot.is_destroyed() && slot.inner.as_deref().is_some_and(|b| downcast_ref::<T>(b).is_some())
            })
        })
    }

    /// Typed access to the first `T` on `node`.
    ///
    /// Returns `None` for the behavior currently running a hook: it is
    /// checked out of the scene until the hook returns.
    pub fn get_behavior<T: Behavior>(&self, node: NodeId) -> Option<&T> {
        self.find_behavior::<T>(node).and_then(|id| self.behavior::<T>(id))
    }

    pub fn get_behavior_mut<T: Behavior>(&mut self, node: NodeId) -> Option<&mut T> {
        let id = self.find_behavior::<T>(node)?;
        self.behavior_mut::<T>(id)
    }

    pub fn behavior<T: Behavior>(&self, id: BehaviorId) -> Option<&T> {
        self.behaviors.get(id)?.inner.as_deref().and_then(|b| downcast_ref::<T>(b))
    }

    pub fn behavior_mut<T: Behavior>(&mut self, id: BehaviorId) -> Option<&mut T> {
        self.behaviors.get_mut(id)?.inner.as_deref_mut().and_then(|b| downcast_mut::<T>(b))
    }

    pub fn lifecycle(&self, id: BehaviorId) -> Option<Lifecycle> {
        self.behaviors.get(id).map(|slot| slot.lifecycle)
    }

    pub fn is_behavior_enabled(&self, id: BehaviorId) -> Option<bool> {
        self.behaviors.get(id).map(|slot| slot.enabled)
    }

    /// Owning node. Fixed for the behavior's whole life.
    pub fn behavior_node(&self, id: BehaviorId) -> Option<NodeId> {
        self.behaviors.get(id).map(|slot| slot.node)
    }

    /// Capabilities detected when the behavior was attached.
    pub fn capabilities(&self, id: BehaviorId) -> Option<Capabilities> {
        self.behaviors.get(id).map(|slot| slot.caps)
    }

    /// Node depth plus the behavior's own offset.
    pub fn effective_depth_of(&self, id: BehaviorId) -> Option<Depth> {
        let slot = self.behaviors.get(id)?;
        let node = self.nodes.get(slot.node)?;
        let offset = slot.inner.as_deref()?.depth_offset();
        Some(super::effective_depth(node.depth, offset))
    }
}
