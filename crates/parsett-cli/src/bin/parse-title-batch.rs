//! Parses release titles and prints a JSON array of
//! `{title, parsed, error}` records in argument order.
//!
//! Usage: `parse-title-batch <TITLE>...`. Exits 0 even when individual
//! titles fail; exits 1 only when no title is given.

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use parsett_cli::{BatchArgs, logging, run_batch};
use parsett_core::HeuristicParser;

fn main() -> Result<ExitCode> {
    logging::setup_logger().context("failed to install the tracing subscriber")?;

    let args = BatchArgs::parse();
    let parser = HeuristicParser::new().context("failed to build the title parser")?;

    let titles = args.titles();
    let status = run_batch(
        &parser,
        &titles,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )?;
    Ok(status.into())
}
