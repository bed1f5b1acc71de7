use crate::coords::Color;

use super::{Primitive, Surface, View};

/// One recorded draw: primitive + the view it was drawn under.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    /// Position in the recorded stream (submission order).
    pub seq: u32,
    pub primitive: Primitive,
    pub view: View,
}

/// Recording [`Surface`].
///
/// Keeps every primitive in submission order with the view that was current
/// at the time, so callers can replay the stream on a real renderer or
/// assert on it. `reset()` keeps allocated capacity for reuse.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_seq: u32,
    clear_color: Option<Color>,
    view_stack: Vec<View>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops recorded items, the clear color and the view stack.
    pub fn reset(&mut self) {
        self.items.clear();
        self.next_seq = 0;
        self.clear_color = None;
        self.view_stack.clear();
    }

    /// Items in submission order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Color of the most recent `clear`, if any.
    #[inline]
    pub fn clear_color(&self) -> Option<Color> {
        self.clear_color
    }

    /// The view draws currently land in.
    #[inline]
    pub fn current_view(&self) -> View {
        self.view_stack.last().copied().unwrap_or_default()
    }

    /// Number of views pushed and not yet popped.
    #[inline]
    pub fn view_depth(&self) -> usize {
        self.view_stack.len()
    }
}

impl Surface for DrawList {
    fn clear(&mut self, color: Color) {
        self.items.clear();
        self.next_seq = 0;
        self.clear_color = Some(color);
    }

    fn draw(&mut self, primitive: Primitive) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        let view = self.current_view();
        self.items.push(DrawItem { seq, primitive, view });
    }

    fn push_view(&mut self, view: View) {
        self.view_stack.push(view);
    }

    fn pop_view(&mut self) {
        debug_assert!(!self.view_stack.is_empty(), "pop_view called without matching push_view");
        self.view_stack.pop();
    }

    fn reset_view(&mut self) {
        self.view_stack.clear();
    }
}
