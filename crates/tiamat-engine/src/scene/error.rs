use super::{BehaviorId, Capabilities, NodeId};

/// Contract violations raised by scene operations.
///
/// Every variant signals a caller mistake; none are transient, so callers
/// should not retry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),

    #[error("unknown behavior {0:?}")]
    UnknownBehavior(BehaviorId),

    #[error("node {0:?} is pending destruction")]
    NodeDestroyed(NodeId),

    #[error("node {0:?} cannot be its own child")]
    ReparentToSelf(NodeId),

    #[error("node {child:?} is the parent of {parent:?} and cannot become its child")]
    ReparentToParent { parent: NodeId, child: NodeId },

    #[error("node {child:?} is an ancestor of {parent:?} and cannot become its child")]
    ReparentToDescendant { parent: NodeId, child: NodeId },

    #[error("the root node cannot be reparented or destroyed")]
    RootNode,

    #[error("behavior {behavior:?} ({type_name}) does not provide {capability:?}")]
    MissingCapability {
        behavior: BehaviorId,
        type_name: &'static str,
        capability: Capabilities,
    },

    #[error("no scene named {0:?}")]
    UnknownScene(String),

    #[error("a scene named {0:?} is already staged")]
    DuplicateScene(String),
}

pub type Result<T> = std::result::Result<T, SceneError>;
