//! Scene graph: nodes, behaviors and the per-frame driver.
//!
//! A [`Scene`] owns a tree of [`Node`]s in an arena. Behaviors are attached to
//! nodes and driven through lifecycle hooks by [`Scene::update`]. Behaviors
//! that draw or take part in hit-testing declare it through the
//! [`Renderable`] and [`PointerBlockable`] capabilities, detected once at
//! attach time.
//!
//! Ordering everywhere is by effective depth (node depth plus behavior
//! offset): ascending for drawing, descending for hover resolution.

mod behavior;
mod capability;
mod config;
mod ctx;
mod depth;
mod depth_index;
mod driver;
mod error;
mod graph;
mod names;
mod node;
mod pointer;
mod render;
mod stage;


pub use behavior::{AsAny, Behavior, BehaviorId, Lifecycle};
pub use capability::{Capabilities, PointerBlockable, QueueType, Renderable};
pub use config::SceneConfig;
pub use ctx::BehaviorCtx;
pub use depth::{effective_depth, Depth, SortKey};
pub use driver::{FrameStats, Scene};
pub use error::{Result, SceneError};
pub use node::{Node, NodeId};
pub use pointer::PointerBlockManager;
pub use render::{DrawStats, RenderDispatcher};
pub use stage::Stage;
