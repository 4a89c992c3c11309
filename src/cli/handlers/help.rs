// src/cli/handlers/help.rs

use anyhow::Result;
use clap::CommandFactory;

use crate::{cli::Cli, state::AppContext};

pub fn handle(_args: Vec<String>, _ctx: &mut AppContext) -> Result<()> {
    Cli::command().print_help()?;
    Ok(())
}
