//! Parses one release title and prints it as a JSON object.
//!
//! Usage: `parse-title <TITLE>`. Exits 1 with a JSON error envelope on
//! stderr when no title is given or the title cannot be parsed.

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use parsett_cli::{SingleArgs, logging, run_single};
use parsett_core::HeuristicParser;

fn main() -> Result<ExitCode> {
    logging::setup_logger().context("failed to install the tracing subscriber")?;

    let args = SingleArgs::parse();
    let parser = HeuristicParser::new().context("failed to build the title parser")?;

    let titles = args.titles();
    let status = run_single(
        &parser,
        &titles,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )?;
    Ok(status.into())
}
