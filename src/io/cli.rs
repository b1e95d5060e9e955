//! Command-line interface for the two-stage survey run

use crate::extraction::completion::OpenAiClient;
use crate::io::configuration::{
    API_KEY_ENV, DEFAULT_ENDPOINT, DEFAULT_FIGURE_PATH, DEFAULT_INPUT_PATH, DEFAULT_MODEL,
    DEFAULT_RASTER_PATH, DEFAULT_RASTER_URL, DEFAULT_REPORT_PATH, Settings,
};
use crate::io::error::{PipelineError, Result};
use crate::io::fetch::HttpFetcher;
use crate::io::progress::ProgressFactory;
use crate::pipeline::events::TracingSink;
use crate::pipeline::{RunSummary, Services, run_pipeline};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "sitescout")]
#[command(
    author,
    version,
    about = "Extract archaeological clues from a historical text and render a satellite NIR band"
)]
/// Command-line arguments for a survey run
pub struct Cli {
    /// Historical text to analyse
    #[arg(long, value_name = "FILE", default_value = DEFAULT_INPUT_PATH)]
    pub input: PathBuf,

    /// Markdown report destination
    #[arg(long, value_name = "FILE", default_value = DEFAULT_REPORT_PATH)]
    pub report: PathBuf,

    /// Local satellite raster (downloaded if missing)
    #[arg(long, value_name = "FILE", default_value = DEFAULT_RASTER_PATH)]
    pub raster: PathBuf,

    /// Rendered band figure destination
    #[arg(long, value_name = "FILE", default_value = DEFAULT_FIGURE_PATH)]
    pub figure: PathBuf,

    /// Where to download the raster from when it is missing
    #[arg(long, value_name = "URL", default_value = DEFAULT_RASTER_URL)]
    pub raster_url: String,

    /// Model identifier for the completion call
    #[arg(short, long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Chat-completion endpoint
    #[arg(long, value_name = "URL", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// API credential
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Give up on each network call after this many seconds (default: wait indefinitely)
    #[arg(short, long, value_name = "SECONDS")]
    pub timeout_secs: Option<u64>,

    /// Only report failures; hide progress bars
    #[arg(short, long)]
    pub quiet: bool,
}

impl Settings {
    /// Resolve and validate the run configuration from parsed arguments
    ///
    /// # Errors
    ///
    /// Returns an error if no credential was supplied or any value fails validation
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let api_key = cli
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or(PipelineError::MissingCredential {
                variable: API_KEY_ENV,
            })?;

        let settings = Self {
            input_path: cli.input.clone(),
            report_path: cli.report.clone(),
            raster_path: cli.raster.clone(),
            figure_path: cli.figure.clone(),
            raster_url: cli.raster_url.clone(),
            endpoint: cli.endpoint.clone(),
            model: cli.model.clone(),
            api_key,
            timeout: cli.timeout_secs.map(Duration::from_secs),
            quiet: cli.quiet,
        };
        settings.validate()?;
        Ok(settings)
    }
}

/// Wires the HTTP-backed services and console output into a run
pub struct PipelineRunner {
    settings: Settings,
}

impl PipelineRunner {
    /// Resolve settings from the command line
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the credential is missing
    pub fn new(cli: &Cli) -> Result<Self> {
        Ok(Self {
            settings: Settings::from_cli(cli)?,
        })
    }

    /// Resolved configuration
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run both stages against the real endpoints
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP clients cannot be built or extraction fails hard
    pub fn process(&self) -> Result<RunSummary> {
        let progress = ProgressFactory::new(!self.settings.quiet);
        let completion = OpenAiClient::new(
            self.settings.endpoint.clone(),
            self.settings.api_key.clone(),
            self.settings.timeout,
            progress,
        )?;
        let fetcher = HttpFetcher::new(self.settings.timeout, progress)?;

        let services = Services {
            completion: &completion,
            fetcher: &fetcher,
        };
        run_pipeline(&self.settings, &services, &TracingSink)
    }
}
