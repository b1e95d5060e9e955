//! Archaeological survey helper chaining two independent stages
//!
//! The clue extractor sends a historical text to a hosted chat-completion model and
//! writes its hypothesis to a markdown report. The image visualizer makes sure a
//! satellite raster is on disk, describes its bands, and renders the near-infrared
//! band (or the first band) to a PNG.

#![forbid(unsafe_code)]

/// Prompt, completion client and report for the extraction stage
pub mod extraction;
/// Command line, configuration, error types and file/network I/O
pub mod io;
/// Numeric helpers for rendering
pub mod math;
/// Stage orchestration and status events
pub mod pipeline;
/// Raster decoding, band selection and rendering
pub mod raster;

pub use io::error::{PipelineError, Result};
