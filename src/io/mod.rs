//! Input/output operations and ambient configuration

/// Command-line interface
pub mod cli;
/// Search constants and defaults
pub mod configuration;
/// Error types
pub mod error;
/// Raster codecs
pub mod image;
/// Terminal progress display
pub mod progress;
/// JSON state persistence
pub mod state;
