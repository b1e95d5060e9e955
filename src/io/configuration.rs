//! Pipeline defaults and the resolved run configuration

use crate::io::error::{PipelineError, Result, invalid_parameter};
use std::path::PathBuf;
use std::time::Duration;

// Input and output locations, relative to the working directory
/// Historical text analysed by the extractor
pub const DEFAULT_INPUT_PATH: &str = "gpt_prompts/historical_excerpt.txt";
/// Markdown report receiving the hypothesis
pub const DEFAULT_REPORT_PATH: &str = "reports/final_hypothesis.md";
/// Local copy of the satellite raster
pub const DEFAULT_RASTER_PATH: &str = "data/sentinel_sample.tif";
/// Rendered band figure
pub const DEFAULT_FIGURE_PATH: &str = "reports/sentinel_band8.png";

/// Sample raster fetched when no local copy exists
pub const DEFAULT_RASTER_URL: &str =
    "https://sentinel-s2-l1c.s3.amazonaws.com/tiles/10/T/ET/2022/6/1/0/B08.jp2";

// Remote completion service
/// Chat-completion endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
/// Model identifier sent with every request
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Environment variable holding the API credential
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

// Report content
/// Heading written before the hypothesis text
pub const REPORT_HEADING: &str = "# Final Hypothesis\n\n";
/// Substituted for the hypothesis when the completion call fails
pub const PLACEHOLDER_HYPOTHESIS: &str = "⚠️ GPT analysis failed or quota exceeded.";
/// Longest slice of an error body kept in a [`crate::io::error::CompletionError`]
pub const ERROR_BODY_LIMIT: usize = 320;

// Band selection
/// Sentinel-2 convention for the near-infrared band (1-based)
pub const NIR_BAND_INDEX: usize = 8;
/// Band shown when the raster is too small for the NIR convention
pub const FALLBACK_BAND_INDEX: usize = 1;

// Figure geometry: 12x10 inches at 100 dpi
/// Figure width in pixels
pub const FIGURE_WIDTH_PX: u32 = 1200;
/// Figure height in pixels
pub const FIGURE_HEIGHT_PX: u32 = 1000;
/// Axes rectangle as fractions of the figure: left, bottom, width, height
pub const AXES_RECT: [f64; 4] = [0.125, 0.11, 0.775, 0.77];

// Progress display
/// Tick interval for the request spinner
pub const SPINNER_TICK_MS: u64 = 120;
/// Width of the download progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

/// Everything a run needs, resolved once at startup and passed by reference
#[derive(Debug, Clone)]
pub struct Settings {
    /// Historical text file
    pub input_path: PathBuf,
    /// Hypothesis report destination
    pub report_path: PathBuf,
    /// Local raster path
    pub raster_path: PathBuf,
    /// Rendered figure destination
    pub figure_path: PathBuf,
    /// Where to fetch the raster from when it is missing
    pub raster_url: String,
    /// Chat-completion endpoint
    pub endpoint: String,
    /// Model identifier
    pub model: String,
    /// Bearer credential for the endpoint
    pub api_key: String,
    /// Optional per-request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
    /// Hide progress bars
    pub quiet: bool,
}

impl Settings {
    /// Settings with every default path, for the given credential
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
            raster_path: PathBuf::from(DEFAULT_RASTER_PATH),
            figure_path: PathBuf::from(DEFAULT_FIGURE_PATH),
            raster_url: DEFAULT_RASTER_URL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.into(),
            timeout: None,
            quiet: false,
        }
    }

    /// Check values that would otherwise fail deep inside a stage
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The credential is empty
    /// - The model identifier is empty
    /// - The endpoint or raster URL is not an http(s) URL
    /// - The timeout is zero
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(PipelineError::MissingCredential {
                variable: API_KEY_ENV,
            });
        }

        if self.model.trim().is_empty() {
            return Err(invalid_parameter(
                "model",
                &self.model,
                &"model identifier must not be empty",
            ));
        }

        for (parameter, url) in [("endpoint", &self.endpoint), ("raster_url", &self.raster_url)] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(invalid_parameter(
                    parameter,
                    url,
                    &"expected an http:// or https:// URL",
                ));
            }
        }

        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(invalid_parameter(
                "timeout_secs",
                &0,
                &"timeout must be at least one second",
            ));
        }

        Ok(())
    }
}
