//! stripey_horse: reads ZPL from stdin and writes a PNG of the first label.
//!
//! The image goes to stdout or to `--output`; diagnostics go to stderr.
//! Set `RUST_LOG=debug` to trace the pipeline stages.

use std::io::{self, Write};
use std::process::ExitCode;

use stripey_core::{Outcome, Pipeline, USAGE};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")),
        )
        .init();

    let args: Vec<String> = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    let pipeline = Pipeline::default();
    match pipeline.execute(args, io::stdin().lock(), io::stdout().lock()) {
        Ok(Outcome::Rendered) => ExitCode::SUCCESS,
        Ok(Outcome::Help) => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Outcome::Version) => {
            println!("stripey_horse {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Render failed");
            eprintln!("Error: {e}");
            if e.shows_usage() {
                let mut stdout = io::stdout().lock();
                let _ = stdout.write_all(USAGE.as_bytes());
                let _ = stdout.flush();
            }
            ExitCode::from(e.exit_code())
        }
    }
}
