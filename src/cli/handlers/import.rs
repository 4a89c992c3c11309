// src/cli/handlers/import.rs

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use colored::*;
use std::fs::File;

use super::commons;
use crate::{
    cli::args::ImportArgs,
    core::paths,
    services::import,
    state::AppContext,
};

pub fn handle(args: Vec<String>, ctx: &mut AppContext) -> Result<()> {
    // 1. Resolve the file first, so a typo fails before the password prompt
    let import_args = ImportArgs::try_parse_from(&args)?;
    let expanded = paths::expand_path_template(&import_args.path)?;
    let path = dunce::canonicalize(&expanded)
        .map_err(|_| anyhow!(format!(t!("import.error.file_not_found"), path = expanded.display())))?;
    let file = File::open(&path)
        .with_context(|| format!(t!("import.error.file_unreadable"), path = path.display()))?;

    // 2. Import
    let user = commons::login(ctx, import_args.account.email)?;
    let rules = ctx.config.validation.clone();
    println!(
        "\n{}",
        format!(t!("import.info.importing"), path = path.display().to_string().cyan())
    );
    let report = import::import_csv(ctx.db()?, &rules, &user, file)?;

    // 3. Report
    println!(
        "\n  {}",
        format!(t!("import.success.imported"), count = report.imported.len()).green()
    );
    if !report.skipped.is_empty() {
        println!(
            "\n  {}",
            format!(t!("import.warning.skipped"), count = report.skipped.len()).yellow()
        );
        for row in &report.skipped {
            println!(
                "    {}",
                format!(t!("import.warning.skipped_row"), line = row.line, reason = row.reason).dimmed()
            );
        }
    }
    Ok(())
}
