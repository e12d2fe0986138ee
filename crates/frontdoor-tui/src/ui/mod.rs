//! Terminal UI module using ratatui.
//!
//! - `render`: login screen, routed pages and status bar
//! - `input`: keyboard event handling
//! - `styles`: color scheme and text styling

pub mod input;
pub mod render;
pub mod styles;
