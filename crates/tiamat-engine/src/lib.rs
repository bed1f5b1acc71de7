//! Tiamat engine crate.
//!
//! A 2D scene graph with depth-ordered drawing and topmost-wins hover
//! resolution. Rasterization and windowing belong to the host; this crate
//! talks to them through [`surface::Surface`] and [`input::CursorProvider`].

pub mod coords;
pub mod input;
pub mod logging;
pub mod scene;
pub mod surface;
pub mod time;
