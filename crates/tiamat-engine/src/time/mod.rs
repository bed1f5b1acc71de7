//! Frame timing.
//!
//! One `FrameClock` per scene. The scene ticks it once at the end of every
//! completed `update`, so behaviors observe the delta of the previous frame.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
