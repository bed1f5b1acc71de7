use std::time::Duration;

use crate::coords::Color;
use crate::surface::Camera;
use crate::time::FrameClock;

/// Scene construction parameters.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// Scene name, used by `Stage` and in logs.
    pub name: String,
    /// Name requested for the root node.
    pub root_name: String,
    /// Multiplier applied to every frame delta.
    pub time_scale: f32,
    pub dt_min: Duration,
    pub dt_max: Duration,
    /// When set, `render` clears the surface to this color first.
    pub clear_color: Option<Color>,
    pub camera: Camera,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            name: "scene".to_string(),
            root_name: "Root".to_string(),
            time_scale: 1.0,
            dt_min: FrameClock::DEFAULT_DT_MIN,
            dt_max: FrameClock::DEFAULT_DT_MAX,
            clear_color: None,
            camera: Camera::default(),
        }
    }
}

impl SceneConfig {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn with_time_scale(mut self, scale: f32) -> Self {
        self.time_scale = scale;
        self
    }

    pub fn with_clamps(mut self, dt_min: Duration, dt_max: Duration) -> Self {
        self.dt_min = dt_min;
        self.dt_max = dt_max;
        self
    }

    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.clear_color = Some(color);
        self
    }

    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = camera;
        self
    }
}
