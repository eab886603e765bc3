//! Annotation types produced by the fingerprint analysis
//!
//! All annotation types store coordinates in source image pixel space.
//! Scaling to canvas space happens only at draw time.

use serde::{Deserialize, Serialize};

use super::geometry::Point;

/// Kind of a minutia (local ridge discontinuity)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MinutiaKind {
    /// A ridge that stops
    Ending,
    /// A ridge that splits in two
    Bifurcation,
}

/// Minutia point in source image pixel coordinates
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MinutiaPoint {
    #[serde(rename = "type")]
    pub kind: MinutiaKind,
    pub x: f32,
    pub y: f32,
}

impl MinutiaPoint {
    pub fn new(kind: MinutiaKind, x: f32, y: f32) -> Self {
        Self { kind, x, y }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Core or delta point in source image pixel coordinates
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoreDeltaPoint {
    pub x: f32,
    pub y: f32,
}

impl CoreDeltaPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// All annotation layers for one analysis result
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnnotationSet {
    pub minutiae: Vec<MinutiaPoint>,
    pub core: Vec<CoreDeltaPoint>,
    pub delta: Vec<CoreDeltaPoint>,
}

impl AnnotationSet {
    pub fn new(
        minutiae: Vec<MinutiaPoint>,
        core: Vec<CoreDeltaPoint>,
        delta: Vec<CoreDeltaPoint>,
    ) -> Self {
        Self {
            minutiae,
            core,
            delta,
        }
    }

    /// Number of minutiae of the given kind
    pub fn count(&self, kind: MinutiaKind) -> usize {
        self.minutiae.iter().filter(|m| m.kind == kind).count()
    }

    pub fn is_empty(&self) -> bool {
        self.minutiae.is_empty() && self.core.is_empty() && self.delta.is_empty()
    }

    /// Every coordinate, in layer order, for validation
    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.minutiae
            .iter()
            .map(MinutiaPoint::position)
            .chain(self.core.iter().map(CoreDeltaPoint::position))
            .chain(self.delta.iter().map(CoreDeltaPoint::position))
    }
}
