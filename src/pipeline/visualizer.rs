//! Image visualization stage
//!
//! Nothing in this stage stops the run. A failed download is recorded and the
//! stage carries on; the open that follows then fails and is recorded too.

use crate::io::configuration::Settings;
use crate::io::error::{FetchError, VisualizationError};
use crate::io::fetch::Fetcher;
use crate::io::image::export_figure_as_png;
use crate::pipeline::events::{EventSink, StageEvent};
use crate::raster::render::{FigureLayout, render_band};
use crate::raster::{Raster, SampleType, SelectionReason, choose_display_band};
use std::fs;
use std::path::PathBuf;

/// How the local raster came to exist, or failed to
#[derive(Debug)]
pub enum Acquisition {
    /// The raster was already on disk
    AlreadyPresent,
    /// The raster was downloaded during this run
    Downloaded {
        /// Bytes written
        bytes: u64,
    },
    /// The single download attempt failed
    DownloadFailed(FetchError),
}

/// Details of a successful render
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSummary {
    /// Bands in the raster
    pub band_count: usize,
    /// Per-band sample types
    pub dtypes: Vec<SampleType>,
    /// 1-based band that was rendered
    pub band: usize,
    /// Why that band was picked
    pub reason: SelectionReason,
    /// Figure title
    pub title: String,
    /// Where the figure was written
    pub figure_path: PathBuf,
}

/// Outcome of the visualization stage
#[derive(Debug)]
pub struct VisualizationReport {
    /// Raster acquisition step
    pub acquisition: Acquisition,
    /// Render result, or the classified failure that stopped it
    pub result: Result<RenderSummary, VisualizationError>,
}

impl VisualizationReport {
    /// True when a figure was written
    pub const fn is_rendered(&self) -> bool {
        self.result.is_ok()
    }
}

/// Ensures the raster exists, describes it, and renders one band
pub struct ImageVisualizer<'a> {
    settings: &'a Settings,
    fetcher: &'a dyn Fetcher,
    sink: &'a dyn EventSink,
    layout: FigureLayout,
}

impl<'a> ImageVisualizer<'a> {
    /// Bind the stage to its configuration and collaborators
    pub fn new(settings: &'a Settings, fetcher: &'a dyn Fetcher, sink: &'a dyn EventSink) -> Self {
        Self {
            settings,
            fetcher,
            sink,
            layout: FigureLayout::default(),
        }
    }

    /// Use a non-default canvas
    #[must_use]
    pub const fn with_layout(mut self, layout: FigureLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Run the stage once; failures are returned in the report, never raised
    pub fn run(&self) -> VisualizationReport {
        let acquisition = self.ensure_raster();
        let result = self.render();
        if let Err(error) = &result {
            self.sink.emit(&StageEvent::VisualizationFailed {
                error: error.to_string(),
            });
        }
        VisualizationReport {
            acquisition,
            result,
        }
    }

    /// Download the sample raster if no local copy exists
    pub fn ensure_raster(&self) -> Acquisition {
        let path = &self.settings.raster_path;
        if path.exists() {
            return Acquisition::AlreadyPresent;
        }

        self.sink.emit(&StageEvent::RasterMissing {
            path: path.clone(),
            url: self.settings.raster_url.clone(),
        });

        let fetched = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => fs::create_dir_all(parent).map_err(|source| FetchError::Write {
                path: parent.to_path_buf(),
                source,
            }),
            None => Ok(()),
        }
        .and_then(|()| self.fetcher.fetch(&self.settings.raster_url, path));

        match fetched {
            Ok(bytes) => {
                self.sink.emit(&StageEvent::RasterDownloaded {
                    path: path.clone(),
                    bytes,
                });
                Acquisition::Downloaded { bytes }
            }
            Err(error) => {
                self.sink.emit(&StageEvent::DownloadFailed {
                    error: error.to_string(),
                });
                Acquisition::DownloadFailed(error)
            }
        }
    }

    fn render(&self) -> Result<RenderSummary, VisualizationError> {
        let raster = Raster::open(&self.settings.raster_path)?;
        let (width, height) = raster.dimensions();
        self.sink.emit(&StageEvent::RasterLoaded {
            path: raster.path().to_path_buf(),
            band_count: raster.band_count(),
            width,
            height,
        });

        for band in raster.bands() {
            self.sink.emit(&StageEvent::BandDescribed {
                band: band.index,
                dtype: band.dtype,
                description: band.description.clone(),
            });
        }

        let selection = choose_display_band(raster.band_count(), &raster.descriptions())
            .ok_or_else(|| VisualizationError::NoBands {
                path: raster.path().to_path_buf(),
            })?;
        self.sink.emit(&StageEvent::BandSelected {
            band: selection.band,
            reason: selection.reason.clone(),
        });

        let band = raster.read_band(selection.band)?;
        let title = selection.title();
        let figure = render_band(&band, raster.nodata(), &title, &self.layout)?;

        let figure_path = self.settings.figure_path.clone();
        export_figure_as_png(&figure.image, &figure_path)?;
        self.sink.emit(&StageEvent::FigureSaved {
            path: figure_path.clone(),
            title: title.clone(),
        });

        Ok(RenderSummary {
            band_count: raster.band_count(),
            dtypes: raster.bands().iter().map(|b| b.dtype).collect(),
            band: selection.band,
            reason: selection.reason,
            title,
            figure_path,
        })
    }
}
