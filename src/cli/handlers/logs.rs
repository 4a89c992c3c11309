// src/cli/handlers/logs.rs

use anyhow::{Result, anyhow};
use clap::Parser;
use colored::*;

use super::commons;
use crate::{
    cli::args::LogsArgs,
    models::{LogEntry, LogLevel, User},
    services::logs,
    state::AppContext,
};

pub fn handle(args: Vec<String>, ctx: &mut AppContext) -> Result<()> {
    // 1. Parse and validate arguments before asking for a password
    let logs_args = LogsArgs::try_parse_from(&args)?;
    let level = logs_args
        .level
        .as_deref()
        .map(str::parse::<LogLevel>)
        .transpose()
        .map_err(|e| anyhow!(e))?;
    let limit = logs_args.limit.unwrap_or(ctx.config.logs.default_limit);

    // 2. Show
    let user = commons::login(ctx, logs_args.account.email)?;
    show(ctx, &user, limit, level)
}

pub fn show(ctx: &mut AppContext, user: &User, limit: usize, level: Option<LogLevel>) -> Result<()> {
    let entries = logs::recent(ctx.db()?, user, limit, level)?;
    println!(
        "\n{}",
        format!(t!("logs.info.header"), count = entries.len()).bold()
    );
    if entries.is_empty() {
        println!("\n  {}", t!("logs.info.none").dimmed());
        return Ok(());
    }
    println!();
    for entry in &entries {
        println!("  {}", format_entry(entry));
    }
    Ok(())
}

fn format_entry(entry: &LogEntry) -> String {
    let level = match entry.level {
        LogLevel::Info => entry.level.as_str().blue(),
        LogLevel::Warning => entry.level.as_str().yellow(),
        LogLevel::Error => entry.level.as_str().red(),
    };
    format!(
        "{}  {:<8} {:<26} {}",
        entry.created_at.format("%Y-%m-%d %H:%M:%S").to_string().dimmed(),
        level,
        entry.action,
        entry.details.to_string().dimmed()
    )
}
