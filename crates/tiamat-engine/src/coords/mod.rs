//! Geometry and color types shared by the scene graph and its collaborators.
//!
//! Two spaces exist:
//! - screen space: logical pixels, origin top-left, +X right, +Y down
//! - world space: scene units, mapped to screen space by a [`crate::surface::Camera`]
//!
//! Both use the same `Vec2`/`Rect` types; which space a value lives in is
//! decided by the queue type of whoever owns it.

mod color;
mod rect;
mod vec2;

pub use color::Color;
pub use rect::Rect;
pub use vec2::Vec2;
