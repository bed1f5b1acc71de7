use crate::coords::Vec2;

/// Uniform-scale + translate transform from draw coordinates to screen pixels.
///
/// `screen = point * scale + translation`
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct View {
    pub scale: f32,
    pub translation: Vec2,
}

impl View {
    #[inline]
    pub const fn identity() -> Self {
        Self { scale: 1.0, translation: Vec2::zero() }
    }

    #[inline]
    pub fn is_identity(self) -> bool {
        self == Self::identity()
    }

    #[inline]
    pub fn apply(self, p: Vec2) -> Vec2 {
        p * self.scale + self.translation
    }

    /// Inverse of [`apply`](Self::apply). A zero scale maps everything to the origin.
    #[inline]
    pub fn invert(self, p: Vec2) -> Vec2 {
        if self.scale == 0.0 {
            return Vec2::zero();
        }
        (p - self.translation) / self.scale
    }
}

impl Default for View {
    fn default() -> Self {
        Self::identity()
    }
}

/// 2D world camera.
///
/// `center` is the world point shown at the middle of the viewport; `zoom`
/// is screen pixels per world unit.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub center: Vec2,
    pub zoom: f32,
    /// Viewport size in screen pixels.
    pub viewport: Vec2,
}

impl Camera {
    pub const MIN_ZOOM: f32 = 0.05;
    pub const MAX_ZOOM: f32 = 32.0;

    /// Camera whose world space coincides with screen space for `viewport`.
    pub fn new(viewport: Vec2) -> Self {
        Self { center: viewport * 0.5, zoom: 1.0, viewport }
    }

    pub fn with_center(mut self, center: Vec2) -> Self {
        self.center = center;
        self
    }

    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.set_zoom(zoom);
        self
    }

    /// Sets zoom, clamped to `[MIN_ZOOM, MAX_ZOOM]`.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);
    }

    /// The transform a surface applies for world-space draws.
    pub fn view(&self) -> View {
        View {
            scale: self.zoom,
            translation: self.viewport * 0.5 - self.center * self.zoom,
        }
    }

    #[inline]
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        self.view().apply(world)
    }

    #[inline]
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        self.view().invert(screen)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec2::new(1280.0, 720.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_maps_screen_onto_world() {
        let cam = Camera::new(Vec2::new(800.0, 600.0));
        assert!(cam.view().is_identity());
        assert_eq!(cam.screen_to_world(Vec2::new(12.0, 34.0)), Vec2::new(12.0, 34.0));
    }

    #[test]
    fn panned_and_zoomed_camera_round_trips() {
        let cam = Camera::new(Vec2::new(800.0, 600.0))
            .with_center(Vec2::new(100.0, 50.0))
            .with_zoom(2.0);

        // The viewport center always shows the camera center.
        assert_eq!(cam.screen_to_world(Vec2::new(400.0, 300.0)), Vec2::new(100.0, 50.0));
        assert_eq!(cam.world_to_screen(Vec2::new(110.0, 50.0)), Vec2::new(420.0, 300.0));

        let p = Vec2::new(37.0, 512.0);
        assert_eq!(cam.world_to_screen(cam.screen_to_world(p)), p);
    }

    #[test]
    fn zoom_is_clamped() {
        let cam = Camera::default().with_zoom(1000.0);
        assert_eq!(cam.zoom, Camera::MAX_ZOOM);
        let cam = Camera::default().with_zoom(0.0);
        assert_eq!(cam.zoom, Camera::MIN_ZOOM);
    }
}
