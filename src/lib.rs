//! Workout feed viewer library
//!
//! Exposes the loader, cache, sorting and UI modules for the binary and for
//! integration tests.

pub mod app;
pub mod cache;
pub mod cli;
pub mod feed;
pub mod loader;
pub mod logging;
pub mod sort;
pub mod ui;
pub mod view;
