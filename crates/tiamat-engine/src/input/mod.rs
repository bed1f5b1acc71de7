//! Cursor contract consumed by the pointer manager.
//!
//! The host owns the platform event loop and translates pointer motion into
//! a [`CursorProvider`]. The scene asks it for both positions exactly once
//! per frame.

mod cursor;

pub use cursor::{CursorPosition, CursorProvider, NoCursor, PointerInput};
