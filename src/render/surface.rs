//! Drawing surfaces (primary canvas and inspection canvas)

use anyhow::Context;
use image::RgbaImage;
use tiny_skia::{Color, Pixmap};

use crate::config::SurfaceSize;

/// An RGBA pixel buffer the compositor draws into
#[derive(Clone, Debug)]
pub struct Surface {
    pixmap: Pixmap,
    composited: bool,
}

impl Surface {
    pub fn new(size: SurfaceSize) -> anyhow::Result<Self> {
        let pixmap = Pixmap::new(size.width, size.height)
            .with_context(|| format!("invalid surface size {}x{}", size.width, size.height))?;
        Ok(Self {
            pixmap,
            composited: false,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }

    /// Premultiplied RGBA bytes, row-major
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Whether the last render produced a full frame
    pub fn is_composited(&self) -> bool {
        self.composited
    }

    pub(crate) fn set_composited(&mut self, composited: bool) {
        self.composited = composited;
    }

    pub fn clear(&mut self) {
        self.pixmap.fill(Color::TRANSPARENT);
    }

    /// Straight-alpha pixel at (x, y), as exported
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Read the surface back into a straight-alpha image
    pub fn to_rgba_image(&self) -> RgbaImage {
        let mut img = RgbaImage::new(self.width(), self.height());
        for (dst, src) in img.pixels_mut().zip(self.pixmap.pixels()) {
            let c = src.demultiply();
            dst.0 = [c.red(), c.green(), c.blue(), c.alpha()];
        }
        img
    }
}
