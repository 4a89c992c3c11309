// src/bin/recall.rs

use anyhow::Result;
use clap::Parser;
use colored::*;
use recall::{
    cli::{Cli, dispatcher, handlers::commons},
    state::AppContext,
};

/// Sets up logging, parses arguments, dispatches to the handler and reports
/// any error in one place.
fn main() {
    env_logger::init();

    if let Err(e) = run_cli(Cli::parse()) {
        // Per-command `--help` and usage errors render the way clap intends.
        if let Some(clap_error) = e.downcast_ref::<clap::Error>() {
            clap_error.exit();
        }
        // Backing out of a prompt is not a failure worth printing.
        if commons::is_cancellation(&e) {
            std::process::exit(130);
        }

        eprintln!("\n{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run_cli(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);
    let mut ctx = AppContext::load()?;
    dispatcher::dispatch(cli.args, &mut ctx)
}
