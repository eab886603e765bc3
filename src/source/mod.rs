//! Image sources
//!
//! This module consolidates:
//! - Raster and image handle types (image.rs)
//! - Asynchronous image loading (loader.rs)

pub mod image;
pub mod loader;

pub use self::image::{AnnotatedImage, ImageHandle, LoadState, Raster};
pub use self::loader::load_image;
