//! Configuration persistence for ridgeview settings

use std::path::PathBuf;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::domain::ImageVariant;

/// Serializable color representation for config storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl MarkerColor {
    pub const WHITE: MarkerColor = MarkerColor::from_hex(0xffffff);

    /// Build from a 0xRRGGBB literal
    pub const fn from_hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
        }
    }

    /// Convert to RGBA format (0-255), fully opaque
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

/// Fill colors for each marker kind. Outlines and labels are always white.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerPalette {
    pub ending: MarkerColor,
    pub bifurcation: MarkerColor,
    pub core: MarkerColor,
    pub delta: MarkerColor,
}

impl Default for MarkerPalette {
    fn default() -> Self {
        Self {
            ending: MarkerColor::from_hex(0xef4444),
            bifurcation: MarkerColor::from_hex(0x3b82f6),
            core: MarkerColor::from_hex(0x22c55e),
            delta: MarkerColor::from_hex(0xf97316),
        }
    }
}

/// Where exported visualizations are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SaveLocation {
    #[default]
    Downloads,
    Pictures,
    Documents,
}

impl SaveLocation {
    /// Resolve the directory, falling back to a folder under $HOME
    pub fn dir(self) -> Option<PathBuf> {
        match self {
            SaveLocation::Downloads => {
                dirs::download_dir().or_else(|| dirs::home_dir().map(|h| h.join("Downloads")))
            }
            SaveLocation::Pictures => {
                dirs::picture_dir().or_else(|| dirs::home_dir().map(|h| h.join("Pictures")))
            }
            SaveLocation::Documents => {
                dirs::document_dir().or_else(|| dirs::home_dir().map(|h| h.join("Documents")))
            }
        }
    }
}

/// Pixel size of a drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Application configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Size of the inline canvas
    pub primary_size: SurfaceSize,
    /// Size of the fullscreen inspection canvas
    pub inspection_size: SurfaceSize,
    /// Variant shown first when an enhanced image exists
    pub preferred_variant: ImageVariant,
    /// Initial visibility of the minutiae layer
    pub show_minutiae: bool,
    /// Initial visibility of the core/delta layer
    pub show_core_delta: bool,
    /// Marker fill colors
    pub palette: MarkerPalette,
    /// Where to save exported PNGs
    pub save_location: SaveLocation,
    /// Seconds a deferred export waits for the first frame before failing
    pub export_timeout_secs: u64,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            primary_size: SurfaceSize::new(600, 400),
            inspection_size: SurfaceSize::new(800, 600),
            // Enhanced first, matching the results page
            preferred_variant: ImageVariant::Enhanced,
            show_minutiae: true,
            show_core_delta: true,
            palette: MarkerPalette::default(),
            save_location: SaveLocation::Downloads,
            export_timeout_secs: 10,
        }
    }
}

impl RendererConfig {
    /// Application directory name under the user config dir
    pub const ID: &'static str = "ridgeview";

    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(Self::ID).join("config.json"))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            log::warn!("Could not determine config directory, using defaults");
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Error loading config, using defaults: {:?}", err);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &std::path::Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Save configuration to disk
    pub fn save(&self) {
        let Some(path) = Self::path() else {
            log::error!("Could not determine config directory for saving");
            return;
        };
        if let Err(err) = self.save_to(&path) {
            log::error!("Failed to save config: {:?}", err);
        }
    }

    pub fn save_to(&self, path: &std::path::Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_colors() {
        assert_eq!(MarkerColor::from_hex(0xef4444).to_rgba_u8(), [0xef, 0x44, 0x44, 255]);
        assert_eq!(MarkerColor::WHITE.to_rgba_u8(), [255, 255, 255, 255]);
    }

    #[test]
    fn test_partial_config_takes_defaults() {
        let config: RendererConfig =
            serde_json::from_str(r#"{"export_timeout_secs": 3, "show_minutiae": false}"#).unwrap();
        assert_eq!(config.export_timeout_secs, 3);
        assert!(!config.show_minutiae);
        assert_eq!(config.primary_size, SurfaceSize::new(600, 400));
        assert_eq!(config.palette, MarkerPalette::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = RendererConfig {
            save_location: SaveLocation::Pictures,
            inspection_size: SurfaceSize::new(1024, 768),
            ..Default::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(RendererConfig::load_from(&path).unwrap(), config);
    }
}
