//! Layer compositor
//!
//! Produces one full frame from `(image, annotations, view)`. Layers are
//! always drawn in the same order, so overlays are never hidden by the base
//! raster and core/delta markers are never hidden by minutiae:
//!
//! 1. base raster (original or enhanced)
//! 2. minutiae layer
//! 3. core/delta layer

use tiny_skia::{FilterQuality, PixmapPaint};

use super::geometry::MarkerKind;
use super::markers::draw_marker;
use super::surface::Surface;
use crate::config::MarkerPalette;
use crate::domain::{AnnotationSet, CanvasTransform, Layer, Point, ViewState};
use crate::source::{AnnotatedImage, LoadState};

/// Outcome of a render call
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    /// Base raster and visible layers were drawn
    Composited,
    /// The active raster has not finished loading; surface left blank
    ImagePending,
    /// The active raster failed to load; surface left blank
    ImageFailed,
}

impl FrameStatus {
    pub fn is_composited(self) -> bool {
        self == FrameStatus::Composited
    }
}

/// Clear `surface` and draw a full frame onto it.
///
/// Markers are only drawn when the active raster is available: without the
/// image they annotate, their positions mean nothing. Calling this twice with
/// the same inputs yields the same pixels.
pub fn render(
    surface: &mut Surface,
    image: &AnnotatedImage,
    annotations: &AnnotationSet,
    view: &ViewState,
    palette: &MarkerPalette,
) -> FrameStatus {
    surface.clear();

    let handle = image.resolve(view.active_variant());
    let raster = match &handle.state {
        LoadState::Loaded(raster) => raster,
        LoadState::Loading => {
            surface.set_composited(false);
            return FrameStatus::ImagePending;
        }
        LoadState::Failed(reason) => {
            log::debug!("Skipping frame, {} failed to load: {}", handle.source, reason);
            surface.set_composited(false);
            return FrameStatus::ImageFailed;
        }
    };

    let transform = CanvasTransform::new(view.zoom());
    let pixmap = surface.pixmap_mut();

    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..Default::default()
    };
    pixmap.draw_pixmap(0, 0, raster.pixmap().as_ref(), &paint, transform.as_skia(), None);

    let (width, height) = (pixmap.width() as f32, pixmap.height() as f32);
    let mut draw = |kind: MarkerKind, at: Point| {
        // tiny-skia clips partial markers; fully off-surface ones are skipped
        let r = kind.footprint();
        if at.x + r < 0.0 || at.y + r < 0.0 || at.x - r > width || at.y - r > height {
            return;
        }
        draw_marker(pixmap, kind, at, palette);
    };

    if view.is_visible(Layer::Minutiae) {
        for minutia in &annotations.minutiae {
            draw(MarkerKind::from(minutia.kind), transform.to_canvas(minutia.position()));
        }
    }

    if view.is_visible(Layer::CoreDelta) {
        for core in &annotations.core {
            draw(MarkerKind::Core, transform.to_canvas(core.position()));
        }
        for delta in &annotations.delta {
            draw(MarkerKind::Delta, transform.to_canvas(delta.position()));
        }
    }

    surface.set_composited(true);
    FrameStatus::Composited
}
