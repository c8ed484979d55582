//! The `spmb` management binary.

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use spmb_cli::{execute, load_settings, Cli, Outcome};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let settings = load_settings(&cli)?;
    spmb_core::logging::setup_logging(&settings);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let outcome = execute(&cli.command, &settings, &mut out).await?;
    out.flush()?;

    Ok(match outcome {
        Outcome::Success => ExitCode::SUCCESS,
        Outcome::Invalid => ExitCode::FAILURE,
    })
}
