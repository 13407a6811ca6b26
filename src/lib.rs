//! # taildiff - Live-Tailing Terminal Log Viewer
//!
//! Follows a growing log file and shows a bounded, filterable window of it.
//! The window is never redrawn wholesale: every change is expressed as a small
//! patch (rows added at one end, rows dropped from the other, everything
//! replaced, or everything cleared).
//!
//! ## Features
//!
//! - **Windowed diffing**: index-range comparison decides the minimal patch
//! - **Adaptive paging**: paging back grows the window up to a ceiling, then slides
//! - **Projection**: case-insensitive filter, highlight, error tag and mask
//! - **Live follow**: debounced change notification plus a polling fallback
//!
//! ## Architecture
//!
//! - [`window`] - The view core: cache, paginator, reducer and its worker
//! - [`render`] - Command/event protocol, patch buffer and terminal UI
//! - [`file_handler`] - Incremental file reading and change notification
//! - [`input`] - Keyboard state machine
//! - [`config`] - Persisted settings
//! - [`app`] - Application core and component coordination
//! - [`error`] - Centralized error types and handling

// Core modules
pub mod error;
pub mod window;

// Collaborators around the core
pub mod config;
pub mod file_handler;
pub mod input;
pub mod render;

pub mod app;

// Re-export commonly used types for convenience
pub use error::{Result, TaildiffError};

// Public API surface for external usage
pub use app::Application;
pub use config::Settings;
pub use file_handler::{FileTailer, LineSupplier};
pub use window::{State, ViewHandle};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
