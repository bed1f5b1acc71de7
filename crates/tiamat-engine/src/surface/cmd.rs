use crate::coords::{Color, Rect, Vec2};

/// Renderer-agnostic draw primitive.
///
/// Coordinates are interpreted in whatever view is current on the surface.
/// Adding a primitive means adding a variant here and teaching every
/// `Surface` implementation to draw it.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Rect { rect: Rect, color: Color },
    Circle { center: Vec2, radius: f32, color: Color },
    Line { from: Vec2, to: Vec2, width: f32, color: Color },
    Text { text: String, origin: Vec2, size: f32, color: Color },
}

impl Primitive {
    pub fn rect(rect: Rect, color: Color) -> Self {
        Self::Rect { rect, color }
    }

    pub fn circle(center: Vec2, radius: f32, color: Color) -> Self {
        Self::Circle { center, radius, color }
    }

    pub fn line(from: Vec2, to: Vec2, width: f32, color: Color) -> Self {
        Self::Line { from, to, width, color }
    }

    pub fn text(text: impl Into<String>, origin: Vec2, size: f32, color: Color) -> Self {
        Self::Text { text: text.into(), origin, size, color }
    }

    /// Short variant name, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Primitive::Rect { .. } => "rect",
            Primitive::Circle { .. } => "circle",
            Primitive::Line { .. } => "line",
            Primitive::Text { .. } => "text",
        }
    }
}
