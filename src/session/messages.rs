//! Message types for a visualization session
//!
//! This module contains the Msg enum with nested sub-enums; every user
//! interaction and every image-load completion enters the session as one of these.

use std::time::Instant;

use crate::domain::{ImageVariant, Layer};
use crate::export::now_millis;
use crate::source::Raster;

// ============================================================================
// View Types
// ============================================================================

/// Zoom, variant and layer controls
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewMsg {
    ZoomIn,
    ZoomOut,
    ResetZoom,
    SetVariant(ImageVariant),
    ToggleLayer(Layer),
}

// ============================================================================
// Image Loading Types
// ============================================================================

/// Completion of an asynchronous image load
#[derive(Debug, Clone)]
pub enum ImageMsg {
    Loaded {
        variant: ImageVariant,
        source: String,
        raster: Raster,
    },
    Failed {
        variant: ImageVariant,
        source: String,
        reason: String,
    },
}

// ============================================================================
// Export / Inspection Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExportMsg {
    /// Export the primary surface; deferred until the first full frame
    Request { timestamp_ms: i64, at: Instant },
    /// Expire deferred exports that waited too long
    Tick(Instant),
}

impl ExportMsg {
    pub fn request_now() -> Self {
        ExportMsg::Request {
            timestamp_ms: now_millis(),
            at: Instant::now(),
        }
    }
}

/// Fullscreen inspection surface actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InspectMsg {
    Open,
    Close,
    Toggle,
}

/// Top-level session message
#[derive(Debug, Clone)]
pub enum Msg {
    View(ViewMsg),
    Image(ImageMsg),
    Export(ExportMsg),
    Inspect(InspectMsg),
}

impl From<ViewMsg> for Msg {
    fn from(msg: ViewMsg) -> Self {
        Msg::View(msg)
    }
}

impl From<ImageMsg> for Msg {
    fn from(msg: ImageMsg) -> Self {
        Msg::Image(msg)
    }
}

impl From<ExportMsg> for Msg {
    fn from(msg: ExportMsg) -> Self {
        Msg::Export(msg)
    }
}

impl From<InspectMsg> for Msg {
    fn from(msg: InspectMsg) -> Self {
        Msg::Inspect(msg)
    }
}
