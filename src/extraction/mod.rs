//! Building blocks of the clue extraction stage

/// Chat-completion client seam and the OpenAI-compatible implementation
pub mod completion;
/// Fixed instruction prompt
pub mod prompt;
/// Markdown report output
pub mod report;
