// src/cli/handlers/register.rs

use anyhow::Result;
use clap::Parser;
use colored::*;

use super::commons;
use crate::{cli::args::RegisterArgs, core::session_cache, services::users, state::AppContext};

pub fn handle(args: Vec<String>, ctx: &mut AppContext) -> Result<()> {
    // 1. Parse arguments; anything missing is asked for
    let register_args = RegisterArgs::try_parse_from(&args)?;
    println!("\n{}", t!("register.info.header").bold());

    let name = match register_args.name {
        Some(name) => name,
        None => commons::prompt_name()?,
    };
    let email = match register_args.email {
        Some(email) => email,
        None => commons::prompt_email()?,
    };
    let password = commons::prompt_new_password()?;

    // 2. Create the account
    let user = users::register(ctx.db()?, &name, &email, &password)?;

    if let Err(e) = session_cache::write_remembered_login(&ctx.config_dir, &user.email) {
        log::warn!("Could not remember login: {}", e);
    }

    // 3. Feedback
    println!("\n{}", t!("common.success").green().bold());
    println!(
        "  {}",
        format!(t!("register.success.created"), name = user.name.cyan(), email = user.email)
    );
    println!("  {}", t!("register.info.next_steps").dimmed());
    Ok(())
}
