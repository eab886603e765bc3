//! Annotation rendering module
//!
//! This module contains:
//! - Marker geometry constants (fixed, zoom-independent sizes)
//! - Marker primitives drawn with tiny-skia
//! - Drawing surfaces
//! - The layer compositor that turns inputs into a frame

pub mod compositor;
pub mod geometry;
pub mod markers;
pub mod surface;

pub use compositor::{FrameStatus, render};
pub use geometry::MarkerKind;
pub use surface::Surface;
