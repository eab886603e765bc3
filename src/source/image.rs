//! Raster handles for the fingerprint images

use std::sync::Arc;

use image::RgbaImage;
use tiny_skia::{IntSize, Pixmap};

use crate::domain::ImageVariant;

/// A decoded fingerprint raster, premultiplied and ready to draw
#[derive(Clone, Debug)]
pub struct Raster {
    pixmap: Arc<Pixmap>,
}

impl Raster {
    /// Create a Raster from straight-alpha RGBA pixels
    pub fn from_rgba(img: &RgbaImage) -> anyhow::Result<Self> {
        let size = IntSize::from_wh(img.width(), img.height())
            .ok_or_else(|| anyhow::anyhow!("image has zero size"))?;

        let mut data = Vec::with_capacity(img.as_raw().len());
        for px in img.pixels() {
            let [r, g, b, a] = px.0;
            let c = tiny_skia::ColorU8::from_rgba(r, g, b, a).premultiply();
            data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }

        let pixmap = Pixmap::from_vec(data, size)
            .ok_or_else(|| anyhow::anyhow!("invalid pixmap buffer"))?;
        log::debug!("Raster decoded: {}x{} pixels", img.width(), img.height());
        Ok(Self {
            pixmap: Arc::new(pixmap),
        })
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }
}

impl PartialEq for Raster {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.pixmap, &other.pixmap)
    }
}

/// Load progress of one image source
#[derive(Clone, Debug, Default, PartialEq)]
pub enum LoadState {
    #[default]
    Loading,
    Loaded(Raster),
    Failed(String),
}

/// Reference to a source image plus its load state
#[derive(Clone, Debug, PartialEq)]
pub struct ImageHandle {
    pub source: String,
    pub state: LoadState,
}

impl ImageHandle {
    /// A handle still waiting for its raster
    pub fn pending(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            state: LoadState::Loading,
        }
    }

    pub fn loaded(source: impl Into<String>, raster: Raster) -> Self {
        Self {
            source: source.into(),
            state: LoadState::Loaded(raster),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.state, LoadState::Failed(_))
    }
}

/// The base image and the optional enhanced variant
#[derive(Clone, Debug, PartialEq)]
pub struct AnnotatedImage {
    pub base: ImageHandle,
    pub enhanced: Option<ImageHandle>,
}

impl AnnotatedImage {
    pub fn new(base: ImageHandle, enhanced: Option<ImageHandle>) -> Self {
        Self { base, enhanced }
    }

    pub fn has_enhanced(&self) -> bool {
        self.enhanced.is_some()
    }

    /// Handle for the requested variant, falling back to the base image
    pub fn resolve(&self, variant: ImageVariant) -> &ImageHandle {
        match (variant, &self.enhanced) {
            (ImageVariant::Enhanced, Some(enhanced)) => enhanced,
            _ => &self.base,
        }
    }

    pub fn handle_mut(&mut self, variant: ImageVariant) -> Option<&mut ImageHandle> {
        match variant {
            ImageVariant::Original => Some(&mut self.base),
            ImageVariant::Enhanced => self.enhanced.as_mut(),
        }
    }
}
