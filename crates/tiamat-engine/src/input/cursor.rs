use crate::coords::Vec2;
use crate::surface::Camera;

/// Source of the current cursor position.
pub trait CursorProvider {
    /// Cursor in screen pixels, `None` when the pointer is outside the window.
    fn screen_position(&self) -> Option<Vec2>;

    /// Cursor in world units under `camera`.
    ///
    /// The default maps [`screen_position`](Self::screen_position) through the
    /// camera; providers with their own picking can override it.
    fn world_position(&self, camera: &Camera) -> Option<Vec2> {
        self.screen_position().map(|p| camera.screen_to_world(p))
    }
}

/// Snapshot of pointer state for one frame.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PointerInput {
    pub screen: Option<Vec2>,
}

impl PointerInput {
    pub fn at(x: f32, y: f32) -> Self {
        Self { screen: Some(Vec2::new(x, y)) }
    }

    pub fn outside() -> Self {
        Self { screen: None }
    }
}

impl CursorProvider for PointerInput {
    fn screen_position(&self) -> Option<Vec2> {
        self.screen
    }
}

/// Provider for hosts without a pointer.
#[derive(Debug, Copy, Clone, Default)]
pub struct NoCursor;

impl CursorProvider for NoCursor {
    fn screen_position(&self) -> Option<Vec2> {
        None
    }
}

/// Cursor resolved in both spaces for one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CursorPosition {
    pub screen: Vec2,
    pub world: Vec2,
}

impl CursorPosition {
    /// Queries `provider` once per space. `None` if either space is unavailable.
    pub fn resolve(provider: &dyn CursorProvider, camera: &Camera) -> Option<Self> {
        let screen = provider.screen_position()?;
        let world = provider.world_position(camera)?;
        Some(Self { screen, world })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_maps_world_through_camera() {
        let cam = Camera::new(Vec2::new(200.0, 100.0)).with_zoom(2.0);
        let pos = CursorPosition::resolve(&PointerInput::at(100.0, 50.0), &cam).unwrap();
        assert_eq!(pos.screen, Vec2::new(100.0, 50.0));
        // Viewport center shows the camera center.
        assert_eq!(pos.world, cam.center);
    }

    #[test]
    fn resolve_without_pointer_is_none() {
        assert!(CursorPosition::resolve(&NoCursor, &Camera::default()).is_none());
        assert!(CursorPosition::resolve(&PointerInput::outside(), &Camera::default()).is_none());
    }
}
