//! Visualization session management
//!
//! This module contains:
//! - Message types for user interaction and image loading
//! - Session state: inputs, view state, surfaces and export queue
//! - Message handlers that drive the compositor

pub mod handlers;
pub mod loading;
pub mod messages;
pub mod state;

pub use loading::fetch;
pub use messages::{ExportMsg, ImageMsg, InspectMsg, Msg, ViewMsg};
pub use state::{LoadRequest, Session};
