//! Stage orchestration
//!
//! Each stage takes the run's [`Settings`](crate::io::configuration::Settings) by
//! reference, talks to the network only through a trait object, and reports
//! progress through an [`EventSink`](events::EventSink).

/// Structured stage status events
pub mod events;
/// Clue extraction stage
pub mod extractor;
/// Two-stage runner
pub mod runner;
/// Image visualization stage
pub mod visualizer;

pub use runner::{RunSummary, Services, run_pipeline};
