//! TasteHub engagement-rate inference shim.
//!
//! Reads one JSON object from stdin, scores it against the model artifact
//! shipped next to the executable, and writes one JSON line to stdout.
//! Every failure becomes one `{"error": ...}` line on stderr and exit code 1.

use std::io;

use tracing_subscriber::EnvFilter;

use tastehub_predict::error::ShimResult;
use tastehub_predict::runtime::pipeline::{InferencePipeline, PipelineConfig};

fn run() -> ShimResult<String> {
    let config = PipelineConfig::for_executable()?;
    let pipeline = InferencePipeline::new(config);
    let report = pipeline.run(io::stdin().lock())?;
    report.to_json_line()
}

fn main() {
    // Diagnostics go to stderr and default to silent; stdout carries only
    // the result line. RUST_LOG=tastehub_predict=debug opts into stage logs.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let exit_code = match run() {
        Ok(line) => {
            println!("{line}");
            0
        }
        Err(err) => {
            eprintln!("{}", err.to_json_error());
            err.exit_code()
        }
    };

    std::process::exit(exit_code);
}
