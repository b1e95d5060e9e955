//! Sequential two-stage run

use crate::extraction::completion::CompletionClient;
use crate::io::configuration::Settings;
use crate::io::error::Result;
use crate::io::fetch::Fetcher;
use crate::pipeline::events::EventSink;
use crate::pipeline::extractor::{ClueExtractor, ExtractionReport};
use crate::pipeline::visualizer::{ImageVisualizer, VisualizationReport};

/// Network collaborators, swappable for scripted ones
#[derive(Clone, Copy)]
pub struct Services<'a> {
    /// Chat-completion client
    pub completion: &'a dyn CompletionClient,
    /// Raster downloader
    pub fetcher: &'a dyn Fetcher,
}

/// Outcomes of both stages
#[derive(Debug)]
pub struct RunSummary {
    /// Clue extraction outcome
    pub extraction: ExtractionReport,
    /// Visualization outcome
    pub visualization: VisualizationReport,
}

impl RunSummary {
    /// True when neither stage degraded
    pub const fn is_clean(&self) -> bool {
        !self.extraction.hypothesis.is_placeholder() && self.visualization.is_rendered()
    }
}

/// Run the extractor, then the visualizer
///
/// # Errors
///
/// Returns an error only for hard extraction failures: missing input, unreadable
/// input, prompt rendering, or report writing. The visualizer never fails the run.
pub fn run_pipeline(
    settings: &Settings,
    services: &Services<'_>,
    sink: &dyn EventSink,
) -> Result<RunSummary> {
    let extraction = ClueExtractor::new(settings, services.completion, sink).run()?;
    let visualization = ImageVisualizer::new(settings, services.fetcher, sink).run();

    Ok(RunSummary {
        extraction,
        visualization,
    })
}
