//! Marker primitives drawn with tiny-skia
//!
//! Every function takes a point that is already in canvas space. Fill and
//! outline sizes are fixed; drawing outside the pixmap is clipped.

use tiny_skia::{FillRule, LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap, Stroke, Transform};

use super::geometry::{
    self, BEZIER_K, MarkerKind, bifurcation, core_point, delta_point, ending, label,
};
use crate::config::{MarkerColor, MarkerPalette};
use crate::domain::Point;

fn paint(color: MarkerColor) -> Paint<'static> {
    let [r, g, b, a] = color.to_rgba_u8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

/// Fill a closed path, then stroke it with a white outline
fn fill_with_outline(pixmap: &mut Pixmap, path: &Path, fill: MarkerColor, outline: f32) {
    pixmap.fill_path(
        path,
        &paint(fill),
        FillRule::Winding,
        Transform::identity(),
        None,
    );

    let stroke = Stroke {
        width: outline,
        line_join: LineJoin::Miter,
        ..Default::default()
    };
    pixmap.stroke_path(
        path,
        &paint(MarkerColor::WHITE),
        &stroke,
        Transform::identity(),
        None,
    );
}

fn stroke_label(pixmap: &mut Pixmap, path: &Path) {
    let stroke = Stroke {
        width: label::STROKE,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Default::default()
    };
    pixmap.stroke_path(
        path,
        &paint(MarkerColor::WHITE),
        &stroke,
        Transform::identity(),
        None,
    );
}

/// Build a circle path using cubic bezier curves
fn build_circle_path(cx: f32, cy: f32, r: f32) -> Option<Path> {
    let k = r * BEZIER_K;

    let mut pb = PathBuilder::new();
    pb.move_to(cx, cy - r);
    pb.cubic_to(cx + k, cy - r, cx + r, cy - k, cx + r, cy);
    pb.cubic_to(cx + r, cy + k, cx + k, cy + r, cx, cy + r);
    pb.cubic_to(cx - k, cy + r, cx - r, cy + k, cx - r, cy);
    pb.cubic_to(cx - r, cy - k, cx - k, cy - r, cx, cy - r);
    pb.close();
    pb.finish()
}

fn build_triangle_path(x: f32, y: f32) -> Option<Path> {
    let mut pb = PathBuilder::new();
    pb.move_to(x, y - bifurcation::APEX);
    pb.line_to(x - bifurcation::HALF_BASE, y + bifurcation::BASE);
    pb.line_to(x + bifurcation::HALF_BASE, y + bifurcation::BASE);
    pb.close();
    pb.finish()
}

fn build_diamond_path(x: f32, y: f32) -> Option<Path> {
    let d = core_point::HALF_DIAGONAL;
    let mut pb = PathBuilder::new();
    pb.move_to(x, y - d);
    pb.line_to(x + d, y);
    pb.line_to(x, y + d);
    pb.line_to(x - d, y);
    pb.close();
    pb.finish()
}

fn build_square_path(x: f32, y: f32) -> Option<Path> {
    let half = delta_point::SIDE * 0.5;
    let rect = tiny_skia::Rect::from_xywh(x - half, y - half, delta_point::SIDE, delta_point::SIDE)?;
    Some(PathBuilder::from_rect(rect))
}

/// Open arc shaped like a "C"
fn build_c_glyph(x: f32, y: f32) -> Option<Path> {
    let pts = geometry::c_arc_points(x, y);
    let (&(sx, sy), rest) = pts.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(sx, sy);
    for &(px, py) in rest {
        pb.line_to(px, py);
    }
    pb.finish()
}

/// Vertical stem plus a bowl on the right, shaped like a "D"
fn build_d_glyph(x: f32, y: f32) -> Option<Path> {
    let (w, h) = (label::HALF_WIDTH, label::HALF_HEIGHT);
    let left = x - w;
    let shoulder = x - w * 0.2;
    let right = x + w * 1.2;

    let mut pb = PathBuilder::new();
    pb.move_to(left, y - h);
    pb.line_to(shoulder, y - h);
    pb.cubic_to(right, y - h, right, y + h, shoulder, y + h);
    pb.line_to(left, y + h);
    pb.close();
    pb.finish()
}

/// Red circle for a ridge ending
pub fn draw_ending(pixmap: &mut Pixmap, at: Point, color: MarkerColor) {
    if let Some(path) = build_circle_path(at.x, at.y, ending::RADIUS) {
        fill_with_outline(pixmap, &path, color, ending::OUTLINE);
    }
}

/// Blue apex-up triangle for a bifurcation
pub fn draw_bifurcation(pixmap: &mut Pixmap, at: Point, color: MarkerColor) {
    if let Some(path) = build_triangle_path(at.x, at.y) {
        fill_with_outline(pixmap, &path, color, bifurcation::OUTLINE);
    }
}

/// Green diamond labeled "C" for a core point
pub fn draw_core(pixmap: &mut Pixmap, at: Point, color: MarkerColor) {
    if let Some(path) = build_diamond_path(at.x, at.y) {
        fill_with_outline(pixmap, &path, color, core_point::OUTLINE);
    }
    if let Some(glyph) = build_c_glyph(at.x, at.y) {
        stroke_label(pixmap, &glyph);
    }
}

/// Orange square labeled "D" for a delta point
pub fn draw_delta(pixmap: &mut Pixmap, at: Point, color: MarkerColor) {
    if let Some(path) = build_square_path(at.x, at.y) {
        fill_with_outline(pixmap, &path, color, delta_point::OUTLINE);
    }
    if let Some(glyph) = build_d_glyph(at.x, at.y) {
        stroke_label(pixmap, &glyph);
    }
}

/// Dispatch to the primitive for `kind`, colored from the palette
pub fn draw_marker(pixmap: &mut Pixmap, kind: MarkerKind, at: Point, palette: &MarkerPalette) {
    match kind {
        MarkerKind::Ending => draw_ending(pixmap, at, palette.ending),
        MarkerKind::Bifurcation => draw_bifurcation(pixmap, at, palette.bifurcation),
        MarkerKind::Core => draw_core(pixmap, at, palette.core),
        MarkerKind::Delta => draw_delta(pixmap, at, palette.delta),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank() -> Pixmap {
        let mut pixmap = Pixmap::new(64, 64).unwrap();
        pixmap.fill(tiny_skia::Color::from_rgba8(128, 128, 128, 255));
        pixmap
    }

    fn rgb(pixmap: &Pixmap, x: u32, y: u32) -> [u8; 3] {
        let c = pixmap.pixel(x, y).unwrap().demultiply();
        [c.red(), c.green(), c.blue()]
    }

    /// Columns (at row `y`) whose pixel differs from the gray background
    fn touched_span(pixmap: &Pixmap, y: u32) -> Option<(u32, u32)> {
        let touched: Vec<u32> = (0..pixmap.width())
            .filter(|&x| rgb(pixmap, x, y) != [128, 128, 128])
            .collect();
        Some((*touched.first()?, *touched.last()?))
    }

    #[test]
    fn test_ending_center_is_fill_color() {
        let mut pixmap = blank();
        let palette = MarkerPalette::default();
        draw_marker(&mut pixmap, MarkerKind::Ending, Point::new(32.0, 32.0), &palette);
        // Pixel (31, 31) sits right next to the center
        assert_eq!(rgb(&pixmap, 31, 31), [0xef, 0x44, 0x44]);
    }

    #[test]
    fn test_triangle_interior_is_blue() {
        let mut pixmap = blank();
        draw_bifurcation(&mut pixmap, Point::new(32.0, 32.0), MarkerPalette::default().bifurcation);
        assert_eq!(rgb(&pixmap, 31, 31), [0x3b, 0x82, 0xf6]);
        assert_eq!(rgb(&pixmap, 32, 24), [128, 128, 128]);
    }

    #[test]
    fn test_core_has_white_label() {
        let mut pixmap = blank();
        draw_core(&mut pixmap, Point::new(32.0, 32.0), MarkerPalette::default().core);
        // Left edge of the "C" stroke passes through x = 29.5
        let [r, g, b] = rgb(&pixmap, 29, 31);
        assert!(r > 150 && g > 200 && b > 150, "got {:?}", [r, g, b]);
    }

    #[test]
    fn test_delta_square_extent() {
        let mut pixmap = blank();
        draw_delta(&mut pixmap, Point::new(32.0, 32.0), MarkerPalette::default().delta);
        // Square spans 27..37 plus a 1px outline on each side
        let (first, last) = touched_span(&pixmap, 28).unwrap();
        assert!((25..=26).contains(&first), "first = {first}");
        assert!((37..=38).contains(&last), "last = {last}");
    }

    #[test]
    fn test_marker_offscreen_is_clipped() {
        let mut pixmap = blank();
        let palette = MarkerPalette::default();
        draw_marker(&mut pixmap, MarkerKind::Delta, Point::new(-100.0, 500.0), &palette);
        assert!(pixmap.pixels().iter().all(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue()] == [128, 128, 128]
        }));
    }
}
