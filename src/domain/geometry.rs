//! Points and the source-to-canvas coordinate transform

use tiny_skia::Transform;

/// A 2D point. Which space it lives in depends on where it came from:
/// annotation data is in source pixels, transform output is in canvas pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Uniform scale from source image pixels to canvas pixels.
///
/// Both the base raster and every marker position go through this type,
/// which keeps image and annotations aligned at any zoom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasTransform {
    zoom: f32,
}

impl CanvasTransform {
    pub fn new(zoom: f32) -> Self {
        Self { zoom }
    }

    /// Map a source-space point to canvas space
    #[inline]
    pub fn to_canvas(&self, point: Point) -> Point {
        to_canvas(point, self.zoom)
    }

    /// The same mapping as a tiny-skia transform, for raster draws
    pub fn as_skia(&self) -> Transform {
        Transform::from_scale(self.zoom, self.zoom)
    }
}

/// `point * zoom`, no offset
#[inline]
pub fn to_canvas(point: Point, zoom: f32) -> Point {
    Point::new(point.x * zoom, point.y * zoom)
}
