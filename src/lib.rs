//! Ridge-pattern annotation renderer
//!
//! Composites a fingerprint raster with minutiae, core and delta markers,
//! with zoom, per-layer visibility, a fullscreen inspection surface and PNG
//! export. The compositor ([`render::render`]) is a pure function of its
//! inputs; [`session::Session`] is the message-driven glue around it.

pub mod config;
pub mod domain;
pub mod export;
pub mod panel;
pub mod payload;
pub mod render;
pub mod session;
pub mod source;

pub use config::RendererConfig;
pub use payload::AnalysisPayload;
pub use session::Session;
