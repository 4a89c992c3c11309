// src/cli/handlers/restore.rs

use anyhow::Result;
use clap::Parser;
use colored::*;

use super::commons;
use crate::{cli::args::RestoreArgs, models::User, services::flashcards, state::AppContext};

pub fn handle(args: Vec<String>, ctx: &mut AppContext) -> Result<()> {
    let restore_args = RestoreArgs::try_parse_from(&args)?;
    let user = commons::login(ctx, restore_args.account.email)?;

    if restore_args.all {
        return restore_all(ctx, &user);
    }

    let id = match restore_args.id {
        Some(id) => id,
        None => match pick_trashed(ctx, &user)? {
            Some(id) => id,
            None => return Ok(()),
        },
    };
    restore_one(ctx, &user, id)
}

/// Lets the user pick a card from the trash bin.
pub fn pick_trashed(ctx: &mut AppContext, user: &User) -> Result<Option<i64>> {
    let cards = flashcards::list_trashed(ctx.db()?, user)?;
    if cards.is_empty() {
        println!("\n  {}", t!("trash.info.empty").dimmed());
        return Ok(None);
    }
    Ok(Some(commons::select_flashcard(t!("restore.prompt.select"), &cards)?.id))
}

pub fn restore_one(ctx: &mut AppContext, user: &User, id: i64) -> Result<()> {
    let card = flashcards::restore(ctx.db()?, user, id)?;
    println!(
        "\n  {}",
        format!(t!("restore.success.restored"), id = card.id.to_string().yellow()).green()
    );
    Ok(())
}

pub fn restore_all(ctx: &mut AppContext, user: &User) -> Result<()> {
    let count = flashcards::restore_all(ctx.db()?, user)?;
    println!(
        "\n  {}",
        format!(t!("restore.success.restored_all"), count = count).green()
    );
    Ok(())
}
