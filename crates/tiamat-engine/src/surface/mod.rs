//! Drawing contract consumed by the scene graph.
//!
//! The scene never rasterizes anything itself. It hands [`Primitive`]s to a
//! [`Surface`] implemented by the host (GPU renderer, terminal, test
//! recorder) and brackets them with view changes:
//!
//! 1. `push_view(camera.view())`, world queue, `pop_view()`
//! 2. `push_view(View::identity())`, overlay queue, `pop_view()`
//!
//! [`DrawList`] is a recording implementation used by the studio and tests.

mod cmd;
mod list;
mod view;

pub use cmd::Primitive;
pub use list::{DrawItem, DrawList};
pub use view::{Camera, View};

use crate::coords::Color;

/// A drawing target.
pub trait Surface {
    /// Wipes the target to `color`.
    fn clear(&mut self, color: Color);

    /// Draws one primitive under the current view.
    fn draw(&mut self, primitive: Primitive);

    /// Makes `view` current until the matching [`pop_view`](Self::pop_view).
    fn push_view(&mut self, view: View);

    /// Restores the view that was current before the last `push_view`.
    fn pop_view(&mut self);

    /// Drops every pushed view; subsequent draws use the identity view.
    fn reset_view(&mut self);
}
