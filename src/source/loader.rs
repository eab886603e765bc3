//! Image loading, the only asynchronous boundary of the renderer
//!
//! Sources are local paths (optionally `file://` URLs). Decoding runs on a
//! blocking task; the result is fed back to the session as a message.

use std::path::{Path, PathBuf};

use anyhow::Context;

use super::image::Raster;

/// Strip a `file://` prefix, leaving plain paths untouched
pub fn source_path(source: &str) -> PathBuf {
    PathBuf::from(source.strip_prefix("file://").unwrap_or(source))
}

/// Decode an image file into a drawable raster
pub fn load_image_blocking(path: &Path) -> anyhow::Result<Raster> {
    let img = image::open(path)
        .with_context(|| format!("decoding {}", path.display()))?
        .to_rgba8();
    Raster::from_rgba(&img)
}

/// Load an image source without blocking the caller's task
pub async fn load_image(source: String) -> anyhow::Result<Raster> {
    let path = source_path(&source);
    log::debug!("Loading image {}", path.display());
    tokio::task::spawn_blocking(move || load_image_blocking(&path))
        .await
        .context("image loader task panicked")?
}
