//! Clue extraction stage
//!
//! Missing input is the only failure that stops the run. A failed completion call
//! degrades to the placeholder hypothesis, and the report is written either way.

use crate::extraction::completion::{CompletionClient, CompletionRequest};
use crate::extraction::prompt::PromptTemplate;
use crate::extraction::report::write_report;
use crate::io::configuration::{PLACEHOLDER_HYPOTHESIS, Settings};
use crate::io::error::{CompletionError, PipelineError, Result, file_system};
use crate::pipeline::events::{EventSink, StageEvent};
use std::fs;
use std::path::PathBuf;

/// What ended up in the report
#[derive(Debug)]
pub enum Hypothesis {
    /// The model's response, verbatim
    Model(String),
    /// The placeholder, written because the completion call failed
    Placeholder(CompletionError),
}

impl Hypothesis {
    /// Text written after the report heading
    pub fn text(&self) -> &str {
        match self {
            Self::Model(text) => text,
            Self::Placeholder(_) => PLACEHOLDER_HYPOTHESIS,
        }
    }

    /// True when the completion call failed
    pub const fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }
}

/// Outcome of a completed extraction
#[derive(Debug)]
pub struct ExtractionReport {
    /// Where the report was written
    pub report_path: PathBuf,
    /// What the report contains
    pub hypothesis: Hypothesis,
}

/// Reads the historical text, asks the model, writes the report
pub struct ClueExtractor<'a> {
    settings: &'a Settings,
    completion: &'a dyn CompletionClient,
    sink: &'a dyn EventSink,
}

impl<'a> ClueExtractor<'a> {
    /// Bind the stage to its configuration and collaborators
    pub const fn new(
        settings: &'a Settings,
        completion: &'a dyn CompletionClient,
        sink: &'a dyn EventSink,
    ) -> Self {
        Self {
            settings,
            completion,
            sink,
        }
    }

    /// Run the stage once
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input file does not exist (no report is written)
    /// - The input cannot be read as UTF-8
    /// - The prompt template fails to render
    /// - The report cannot be written
    pub fn run(&self) -> Result<ExtractionReport> {
        let input = &self.settings.input_path;
        if !input.exists() {
            return Err(PipelineError::MissingInput {
                path: input.clone(),
            });
        }

        let document = fs::read_to_string(input).map_err(file_system(input, "read input"))?;
        self.sink.emit(&StageEvent::ExtractionStarted {
            input: input.clone(),
        });

        let prompt = PromptTemplate::new()?.render(&document)?;
        let request = CompletionRequest {
            model: self.settings.model.clone(),
            prompt,
        };

        let hypothesis = match self.completion.complete(&request) {
            Ok(text) => Hypothesis::Model(text),
            Err(error) => {
                self.sink.emit(&StageEvent::CompletionFailed {
                    error: error.to_string(),
                });
                Hypothesis::Placeholder(error)
            }
        };

        let report_path = self.settings.report_path.clone();
        write_report(&report_path, hypothesis.text())?;
        self.sink.emit(&StageEvent::ReportWritten {
            path: report_path.clone(),
            placeholder: hypothesis.is_placeholder(),
        });

        Ok(ExtractionReport {
            report_path,
            hypothesis,
        })
    }
}
