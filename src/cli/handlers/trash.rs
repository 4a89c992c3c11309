// src/cli/handlers/trash.rs

use anyhow::Result;
use clap::Parser;
use colored::*;
use dialoguer::Select;

use super::{commons, delete, restore};
use crate::{
    cli::args::TrashArgs,
    models::User,
    services::flashcards,
    state::AppContext,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrashAction {
    RestoreOne,
    RestoreAll,
    PurgeOne,
    EmptyTrash,
    Back,
}

impl TrashAction {
    const ALL: [Self; 5] = [
        Self::RestoreOne,
        Self::RestoreAll,
        Self::PurgeOne,
        Self::EmptyTrash,
        Self::Back,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::RestoreOne => t!("trash.action.restore_one"),
            Self::RestoreAll => t!("trash.action.restore_all"),
            Self::PurgeOne => t!("trash.action.purge_one"),
            Self::EmptyTrash => t!("trash.action.empty"),
            Self::Back => t!("common.action.back"),
        }
    }
}

pub fn handle(args: Vec<String>, ctx: &mut AppContext) -> Result<()> {
    let trash_args = TrashArgs::try_parse_from(&args)?;
    let user = commons::login(ctx, trash_args.account.email)?;
    run(ctx, &user)
}

/// Shows the trash bin and applies actions until the user goes back or it is empty.
pub fn run(ctx: &mut AppContext, user: &User) -> Result<()> {
    loop {
        let trashed = flashcards::list_trashed(ctx.db()?, user)?;
        println!(
            "\n{}",
            format!(t!("trash.info.header"), count = trashed.len()).bold()
        );
        commons::print_trashed(&trashed);
        if trashed.is_empty() {
            return Ok(());
        }

        let labels: Vec<&str> = TrashAction::ALL.iter().map(|a| a.label()).collect();
        let choice = Select::with_theme(&commons::theme())
            .with_prompt(t!("trash.prompt.action"))
            .items(&labels)
            .default(0)
            .interact_opt()?;
        let action = choice
            .and_then(|i| TrashAction::ALL.get(i).copied())
            .unwrap_or(TrashAction::Back);

        match action {
            TrashAction::RestoreOne => {
                let picked = commons::select_flashcard(t!("restore.prompt.select"), &trashed).map(|c| c.id);
                if let Some(id) = commons::escaped(picked)? {
                    restore::restore_one(ctx, user, id)?;
                }
            }
            TrashAction::RestoreAll => restore::restore_all(ctx, user)?,
            TrashAction::PurgeOne => {
                let picked = commons::select_flashcard(t!("trash.prompt.purge_select"), &trashed).map(|c| c.id);
                if let Some(id) = commons::escaped(picked)? {
                    delete::purge(ctx, user, id, false)?;
                }
            }
            TrashAction::EmptyTrash => empty(ctx, user, trashed.len())?,
            TrashAction::Back => return Ok(()),
        }
    }
}

fn empty(ctx: &mut AppContext, user: &User, count: usize) -> Result<()> {
    println!(
        "\n{}",
        format!(t!("trash.warning.empty"), count = count).red().bold()
    );
    if !commons::confirm(t!("common.prompt.are_you_sure"), false)? {
        println!("\n{}", t!("common.info.operation_cancelled"));
        return Ok(());
    }
    let purged = flashcards::empty_trash(ctx.db()?, user)?;
    println!(
        "\n  {}",
        format!(t!("trash.success.emptied"), count = purged).green()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_back_is_the_last_action() {
        assert_eq!(TrashAction::ALL.last(), Some(&TrashAction::Back));
        let labels: std::collections::HashSet<_> = TrashAction::ALL.iter().map(|a| a.label()).collect();
        assert_eq!(labels.len(), TrashAction::ALL.len());
    }
}
