//! Input/output: command line, configuration, errors, network and files

/// Command-line parsing and the production runner
pub mod cli;
/// Defaults and resolved run settings
pub mod configuration;
/// Error types for hard and soft failures
pub mod error;
/// Single-attempt raster download
pub mod fetch;
/// PNG figure export
pub mod image;
/// Tracing subscriber setup
pub mod logging;
/// Spinners and download progress bars
pub mod progress;
