use super::Vec2;

/// Axis-aligned rectangle (top-left origin + size).
///
/// Used for pointer bounds and rect primitives. Whether a rect is in screen or
/// world units is decided by the owner's queue type.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Rect of `size` centered on `center`.
    #[inline]
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Self::from_origin_size(center - size * 0.5, size)
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Flips negative extents so width/height are non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        let Vec2 { mut x, mut y } = self.origin;
        let Vec2 { x: mut w, y: mut h } = self.size;

        if w < 0.0 {
            x += w;
            w = -w;
        }
        if h < 0.0 {
            y += h;
            h = -h;
        }

        Rect::new(x, y, w, h)
    }

    /// Half-open containment: `[min, max)`.
    ///
    /// Two rects sharing an edge never both contain a point on that edge, so
    /// hit-testing adjacent tiles yields exactly one candidate.
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let r = self.normalized();
        let max = r.max();
        p.x >= r.origin.x && p.y >= r.origin.y && p.x < max.x && p.y < max.y
    }

    #[inline]
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let a = self.normalized();
        let b = other.normalized();

        let x0 = a.origin.x.max(b.origin.x);
        let y0 = a.origin.y.max(b.origin.y);
        let x1 = a.max().x.min(b.max().x);
        let y1 = a.max().y.min(b.max().y);

        if x1 - x0 <= 0.0 || y1 - y0 <= 0.0 {
            None
        } else {
            Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_min_edge_but_not_max_edge() {
        let rect = r(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Vec2::new(0.0, 0.0)));
        assert!(!rect.contains(Vec2::new(10.0, 5.0)));
        assert!(!rect.contains(Vec2::new(5.0, 10.0)));
    }

    #[test]
    fn contains_handles_negative_extent() {
        // Same area as (6, 0, 4, 5).
        let rect = r(10.0, 0.0, -4.0, 5.0);
        assert!(rect.contains(Vec2::new(7.0, 1.0)));
        assert!(!rect.contains(Vec2::new(11.0, 1.0)));
    }

    #[test]
    fn adjacent_rects_share_no_point() {
        let left = r(0.0, 0.0, 10.0, 10.0);
        let right = r(10.0, 0.0, 10.0, 10.0);
        let edge = Vec2::new(10.0, 5.0);
        assert!(!left.contains(edge));
        assert!(right.contains(edge));
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn from_center_size_round_trips_center() {
        let rect = Rect::from_center_size(Vec2::new(50.0, 20.0), Vec2::new(10.0, 4.0));
        assert_eq!(rect.origin, Vec2::new(45.0, 18.0));
        assert_eq!(rect.center(), Vec2::new(50.0, 20.0));
    }

    // ── intersect ─────────────────────────────────────────────────────────

    #[test]
    fn intersect_overlap_and_disjoint() {
        let a = r(0.0, 0.0, 10.0, 10.0);
        assert_eq!(a.intersect(r(5.0, 5.0, 10.0, 10.0)), Some(r(5.0, 5.0, 5.0, 5.0)));
        assert!(a.intersect(r(10.0, 0.0, 3.0, 3.0)).is_none());
        assert!(a.intersect(r(20.0, 20.0, 1.0, 1.0)).is_none());
    }
}
