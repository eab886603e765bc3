//! View state: zoom, active image variant and layer visibility

use serde::{Deserialize, Serialize};

/// Smallest allowed zoom factor
pub const ZOOM_MIN: f32 = 0.5;
/// Largest allowed zoom factor
pub const ZOOM_MAX: f32 = 5.0;
/// Multiplicative zoom step (1.0 -> 1.5 -> 2.25 ...)
pub const ZOOM_STEP: f32 = 1.5;

/// Which raster is shown under the annotations
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImageVariant {
    #[default]
    Original,
    Enhanced,
}

/// Toggleable overlay layer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    Minutiae,
    CoreDelta,
}

/// Renderer-owned view state, reset whenever a new image is supplied
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    active_variant: ImageVariant,
    zoom: f32,
    pub show_minutiae: bool,
    pub show_core_delta: bool,
    enhanced_available: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(false, ImageVariant::Original)
    }
}

impl ViewState {
    /// Fresh state at 100% with both layers visible.
    ///
    /// `preferred` falls back to `Original` when no enhanced image exists.
    pub fn new(enhanced_available: bool, preferred: ImageVariant) -> Self {
        let mut state = Self {
            active_variant: ImageVariant::Original,
            zoom: 1.0,
            show_minutiae: true,
            show_core_delta: true,
            enhanced_available,
        };
        state.set_variant(preferred);
        state
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn active_variant(&self) -> ImageVariant {
        self.active_variant
    }

    pub fn enhanced_available(&self) -> bool {
        self.enhanced_available
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * ZOOM_STEP).min(ZOOM_MAX);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / ZOOM_STEP).max(ZOOM_MIN);
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = 1.0;
    }

    /// Switch variant; asking for `Enhanced` without an enhanced image is a no-op
    pub fn set_variant(&mut self, variant: ImageVariant) {
        if variant == ImageVariant::Enhanced && !self.enhanced_available {
            log::debug!("Enhanced view requested without an enhanced image, ignoring");
            return;
        }
        self.active_variant = variant;
    }

    /// The enhanced image turned out to be unusable; fall back to the original
    pub fn disable_enhanced(&mut self) {
        self.enhanced_available = false;
        self.active_variant = ImageVariant::Original;
    }

    pub fn toggle_layer(&mut self, layer: Layer) {
        match layer {
            Layer::Minutiae => self.show_minutiae = !self.show_minutiae,
            Layer::CoreDelta => self.show_core_delta = !self.show_core_delta,
        }
    }

    pub fn is_visible(&self, layer: Layer) -> bool {
        match layer {
            Layer::Minutiae => self.show_minutiae,
            Layer::CoreDelta => self.show_core_delta,
        }
    }

    /// Zoom as shown next to the zoom buttons, e.g. "225%"
    pub fn zoom_label(&self) -> String {
        format!("{}%", (self.zoom * 100.0).round() as i32)
    }
}
