// src/cli/handlers/list.rs

use anyhow::Result;
use clap::Parser;
use colored::*;

use super::commons;
use crate::{cli::args::ListArgs, models::User, services::flashcards, state::AppContext};

pub fn handle(args: Vec<String>, ctx: &mut AppContext) -> Result<()> {
    let list_args = ListArgs::try_parse_from(&args)?;
    let user = commons::login(ctx, list_args.account.email)?;

    if list_args.trashed {
        show_trashed(ctx, &user)
    } else {
        show(ctx, &user)
    }
}

/// Prints the user's active cards.
pub fn show(ctx: &mut AppContext, user: &User) -> Result<()> {
    let cards = flashcards::list(ctx.db()?, user)?;
    println!(
        "\n{}",
        format!(t!("list.info.header"), count = cards.len()).bold()
    );
    commons::print_flashcards(&cards);
    Ok(())
}

pub fn show_trashed(ctx: &mut AppContext, user: &User) -> Result<()> {
    let cards = flashcards::list_trashed(ctx.db()?, user)?;
    println!(
        "\n{}",
        format!(t!("trash.info.header"), count = cards.len()).bold()
    );
    commons::print_trashed(&cards);
    Ok(())
}
