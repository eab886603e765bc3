//! Marker geometry constants
//!
//! Sizes are in canvas pixels and never scale with zoom: a marker keeps the
//! same footprint at 0.5x and at 5x, only its position moves.

use crate::domain::MinutiaKind;

/// Ridge ending: filled circle
pub mod ending {
    pub const RADIUS: f32 = 4.0;
    pub const OUTLINE: f32 = 1.0;
}

/// Bifurcation: apex-up triangle, 8 wide and 8 tall
pub mod bifurcation {
    /// Apex distance above the anchor point
    pub const APEX: f32 = 5.0;
    /// Base distance below the anchor point
    pub const BASE: f32 = 3.0;
    pub const HALF_BASE: f32 = 4.0;
    pub const OUTLINE: f32 = 1.0;
}

/// Core point: diamond with a "C" label
pub mod core_point {
    pub const HALF_DIAGONAL: f32 = 6.0;
    pub const OUTLINE: f32 = 2.0;
}

/// Delta point: square with a "D" label
pub mod delta_point {
    pub const SIDE: f32 = 10.0;
    pub const OUTLINE: f32 = 2.0;
}

/// Stroked label glyphs drawn inside core/delta markers
pub mod label {
    pub const HALF_WIDTH: f32 = 2.5;
    pub const HALF_HEIGHT: f32 = 3.5;
    pub const STROKE: f32 = 1.5;
    /// Gap of the "C" opening, measured from the +x axis in radians (45 degrees)
    pub const C_GAP: f32 = std::f32::consts::FRAC_PI_4;
    /// Line segments used to approximate the "C" arc
    pub const C_SEGMENTS: usize = 12;
}

/// Ellipse bezier approximation constant: 4/3 * (sqrt(2) - 1)
pub const BEZIER_K: f32 = 0.552_284_8;

/// Which marker is drawn for a point
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerKind {
    Ending,
    Bifurcation,
    Core,
    Delta,
}

impl From<MinutiaKind> for MarkerKind {
    fn from(kind: MinutiaKind) -> Self {
        match kind {
            MinutiaKind::Ending => MarkerKind::Ending,
            MinutiaKind::Bifurcation => MarkerKind::Bifurcation,
        }
    }
}

impl MarkerKind {
    /// Half-extent of the filled shape, excluding its outline
    pub fn half_extent(self) -> f32 {
        match self {
            MarkerKind::Ending => ending::RADIUS,
            MarkerKind::Bifurcation => bifurcation::HALF_BASE,
            MarkerKind::Core => core_point::HALF_DIAGONAL,
            MarkerKind::Delta => delta_point::SIDE * 0.5,
        }
    }

    /// Half-extent including the outline stroke
    pub fn footprint(self) -> f32 {
        let outline = match self {
            MarkerKind::Ending => ending::OUTLINE,
            MarkerKind::Bifurcation => bifurcation::OUTLINE,
            MarkerKind::Core => core_point::OUTLINE,
            MarkerKind::Delta => delta_point::OUTLINE,
        };
        self.half_extent() + outline * 0.5
    }
}

/// Points of the "C" arc around a center, running counter-clockwise
/// from the upper end of the opening to the lower end
pub fn c_arc_points(cx: f32, cy: f32) -> Vec<(f32, f32)> {
    let start = label::C_GAP;
    let end = std::f32::consts::TAU - label::C_GAP;
    (0..=label::C_SEGMENTS)
        .map(|i| {
            let t = start + (end - start) * i as f32 / label::C_SEGMENTS as f32;
            // Screen y grows downward, so negate sin to open on the right
            (
                cx + label::HALF_WIDTH * t.cos(),
                cy - label::HALF_HEIGHT * t.sin(),
            )
        })
        .collect()
}
