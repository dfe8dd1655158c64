//! validate-facet - Main entry point
//!
//! Reads a facet from a file or stdin, enforces the canonical schema, and
//! writes the cleaned facet to stdout or back to the file.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use validate_facet::{run, Args};

fn main() -> ExitCode {
    let args = Args::parse();

    // Logs go to stderr so stdout stays valid JSON
    let default_filter = if args.verbose {
        "validate_facet=debug,facet_validation=debug"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    match run(&args, stdin.lock(), &mut stdout, &mut stderr) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("ERROR: {err:#}");
            ExitCode::FAILURE
        }
    }
}
