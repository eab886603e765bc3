//! Pure domain types with minimal dependencies
//!
//! This module contains the data model shared by the renderer:
//! annotation points, quality metrics, view state and the coordinate transform.
//! Nothing here touches pixels.

pub mod annotation;
pub mod geometry;
pub mod metrics;
pub mod view;

pub use annotation::*;
pub use geometry::*;
pub use metrics::*;
pub use view::*;
