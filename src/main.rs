//! CLI entry point for the clue extraction and band visualization run

use clap::Parser;
use sitescout::io::cli::{Cli, PipelineRunner};

fn main() -> sitescout::Result<()> {
    let cli = Cli::parse();
    sitescout::io::logging::init(cli.quiet);
    let runner = PipelineRunner::new(&cli)?;
    runner.process().map(|_| ())
}
