// src/cli/handlers/delete.rs

use anyhow::Result;
use clap::Parser;
use colored::*;

use super::commons;
use crate::{cli::args::DeleteArgs, models::User, services::flashcards, state::AppContext};

pub fn handle(args: Vec<String>, ctx: &mut AppContext) -> Result<()> {
    // 1. Parse arguments and log in
    let delete_args = DeleteArgs::try_parse_from(&args)?;
    let user = commons::login(ctx, delete_args.account.email)?;

    // 2. Resolve the target card
    let id = match delete_args.id {
        Some(id) => id,
        None => match pick_active(ctx, &user)? {
            Some(id) => id,
            None => return Ok(()),
        },
    };

    // 3. Delete
    if delete_args.force {
        purge(ctx, &user, id, delete_args.yes)
    } else {
        trash(ctx, &user, id)
    }
}

/// The interactive flow used by the menu: pick a card and move it to the trash.
pub fn run(ctx: &mut AppContext, user: &User) -> Result<()> {
    match pick_active(ctx, user)? {
        Some(id) => trash(ctx, user, id),
        None => Ok(()),
    }
}

fn pick_active(ctx: &mut AppContext, user: &User) -> Result<Option<i64>> {
    let cards = flashcards::list(ctx.db()?, user)?;
    if cards.is_empty() {
        println!("\n  {}", t!("flashcard.info.none").dimmed());
        return Ok(None);
    }
    Ok(Some(commons::select_flashcard(t!("delete.prompt.select"), &cards)?.id))
}

fn trash(ctx: &mut AppContext, user: &User, id: i64) -> Result<()> {
    let card = flashcards::delete(ctx.db()?, user, id)?;
    println!(
        "\n  {}",
        format!(t!("delete.success.trashed"), id = card.id.to_string().yellow()).green()
    );
    println!("  {}", t!("delete.info.restore_hint").dimmed());
    Ok(())
}

/// Permanently deletes a card, asking first unless `skip_confirm`.
pub fn purge(ctx: &mut AppContext, user: &User, id: i64, skip_confirm: bool) -> Result<()> {
    if !skip_confirm {
        println!(
            "\n{}",
            format!(t!("delete.warning.permanent"), id = id).red().bold()
        );
        if !commons::confirm(t!("common.prompt.are_you_sure"), false)? {
            println!("\n{}", t!("common.info.operation_cancelled"));
            return Ok(());
        }
    }
    let card = flashcards::force_delete(ctx.db()?, user, id)?;
    println!(
        "\n  {}",
        format!(t!("delete.success.purged"), id = card.id.to_string().yellow()).green()
    );
    Ok(())
}
