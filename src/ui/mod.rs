//! UI rendering module for the workout feed viewer
//!
//! This module contains all the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components.

pub mod feed_list;
pub mod help_overlay;
pub mod status;

pub use feed_list::render_feed_list;
pub use help_overlay::render as render_help_overlay;
pub use status::{render_error, render_loading};
