// src/cli/handlers/reset.rs

use anyhow::Result;
use clap::Parser;
use colored::*;

use super::commons;
use crate::{cli::args::ResetArgs, models::User, services::practice, state::AppContext};

pub fn handle(args: Vec<String>, ctx: &mut AppContext) -> Result<()> {
    let reset_args = ResetArgs::try_parse_from(&args)?;
    let user = commons::login(ctx, reset_args.account.email)?;
    run(ctx, &user, reset_args.yes)
}

pub fn run(ctx: &mut AppContext, user: &User, skip_confirm: bool) -> Result<()> {
    if !skip_confirm {
        println!("\n{}", t!("reset.warning.header").red().bold());
        if !commons::confirm(t!("common.prompt.are_you_sure"), false)? {
            println!("\n{}", t!("common.info.operation_cancelled"));
            return Ok(());
        }
    }

    let removed = practice::reset(ctx.db()?, user)?;
    println!(
        "\n  {}",
        format!(t!("reset.success.done"), count = removed).green()
    );
    Ok(())
}
