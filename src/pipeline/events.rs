//! Stage status events
//!
//! Stages report what they did through an [`EventSink`] instead of printing.
//! [`TracingSink`] turns events into console lines; [`MemorySink`] keeps them for
//! inspection.

use crate::raster::{SampleType, SelectionReason};
use std::cell::RefCell;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Something a stage did or failed to do
#[derive(Debug, Clone, PartialEq)]
pub enum StageEvent {
    /// The extractor found its input and is about to call the model
    ExtractionStarted {
        /// Historical text file
        input: PathBuf,
    },
    /// The completion call failed; the placeholder will be written
    CompletionFailed {
        /// Rendered failure
        error: String,
    },
    /// The hypothesis report was written
    ReportWritten {
        /// Report path
        path: PathBuf,
        /// True when the placeholder was written instead of a model response
        placeholder: bool,
    },
    /// No local raster; a download will be attempted
    RasterMissing {
        /// Expected local path
        path: PathBuf,
        /// Download source
        url: String,
    },
    /// The sample raster was downloaded
    RasterDownloaded {
        /// Local path
        path: PathBuf,
        /// Bytes written
        bytes: u64,
    },
    /// The download failed; the stage continues
    DownloadFailed {
        /// Rendered failure
        error: String,
    },
    /// The raster was decoded
    RasterLoaded {
        /// Raster path
        path: PathBuf,
        /// Number of bands
        band_count: usize,
        /// Width in pixels
        width: u32,
        /// Height in pixels
        height: u32,
    },
    /// Per-band metadata
    BandDescribed {
        /// 1-based band number
        band: usize,
        /// Sample type
        dtype: SampleType,
        /// Description from the file's metadata
        description: Option<String>,
    },
    /// A band was chosen for display
    BandSelected {
        /// 1-based band number
        band: usize,
        /// Why it was chosen
        reason: SelectionReason,
    },
    /// The figure was written
    FigureSaved {
        /// Figure path
        path: PathBuf,
        /// Figure title
        title: String,
    },
    /// The visualization sequence stopped at a failure
    VisualizationFailed {
        /// Rendered failure
        error: String,
    },
}

/// Receives stage events
pub trait EventSink {
    /// Handle one event
    fn emit(&self, event: &StageEvent);
}

/// Logs each event as a human-readable line
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: &StageEvent) {
        match event {
            StageEvent::ExtractionStarted { input } => {
                info!("Analyzing historical text {}", input.display());
            }
            StageEvent::CompletionFailed { error } => {
                error!("Completion call failed: {error}");
            }
            StageEvent::ReportWritten { path, placeholder } => {
                if *placeholder {
                    warn!("Placeholder hypothesis written to {}", path.display());
                } else {
                    info!("Hypothesis written to {}", path.display());
                }
            }
            StageEvent::RasterMissing { path, url } => {
                warn!("{} not found, downloading sample image from {url}", path.display());
            }
            StageEvent::RasterDownloaded { path, bytes } => {
                info!("Sample image downloaded to {} ({bytes} bytes)", path.display());
            }
            StageEvent::DownloadFailed { error } => {
                error!("Failed to download sample image: {error}");
            }
            StageEvent::RasterLoaded {
                path,
                band_count,
                width,
                height,
            } => {
                info!(
                    "Loaded raster {} ({width}x{height}), bands available: {band_count}",
                    path.display()
                );
            }
            StageEvent::BandDescribed {
                band,
                dtype,
                description,
            } => match description {
                Some(description) => info!(" - Band {band} dtype: {dtype} ({description})"),
                None => info!(" - Band {band} dtype: {dtype}"),
            },
            StageEvent::BandSelected { band, reason } => match reason {
                SelectionReason::Fallback => {
                    warn!("Displaying band {band}: {reason}");
                }
                SelectionReason::Tagged { .. } | SelectionReason::Conventional => {
                    info!("Displaying band {band}: {reason}");
                }
            },
            StageEvent::FigureSaved { path, title } => {
                info!("Figure \"{title}\" saved to {}", path.display());
            }
            StageEvent::VisualizationFailed { error } => {
                error!("Error loading or visualizing raster: {error}");
            }
        }
    }
}

/// Records events in emission order
#[derive(Debug, Default)]
pub struct MemorySink {
    events: RefCell<Vec<StageEvent>>,
}

impl MemorySink {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far
    pub fn events(&self) -> Vec<StageEvent> {
        self.events.borrow().clone()
    }
}

impl EventSink for MemorySink {
    fn emit(&self, event: &StageEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
