// src/cli/handlers/practice.rs

use anyhow::Result;
use clap::Parser;
use colored::*;
use dialoguer::{Input, Select};
use scopeguard::ScopeGuard;

use super::commons;
use crate::{
    cli::args::PracticeArgs,
    models::{PracticeStatus, User},
    services::practice,
    state::AppContext,
    storage::Database,
};

pub fn handle(args: Vec<String>, ctx: &mut AppContext) -> Result<()> {
    let practice_args = PracticeArgs::try_parse_from(&args)?;
    let user = commons::login(ctx, practice_args.account.email)?;
    run(ctx, &user)
}

/// Runs one study session. The session is closed however the loop ends.
pub fn run(ctx: &mut AppContext, user: &User) -> Result<()> {
    let db = ctx.db()?;
    let board = practice::board(db, user)?;
    if board.total() == 0 {
        println!("\n  {}", t!("practice.info.no_cards").yellow());
        return Ok(());
    }
    if board.is_complete() {
        commons::print_board(&board);
        println!("\n  {}", t!("practice.success.all_correct").green().bold());
        println!("  {}", t!("practice.info.reset_hint").dimmed());
        return Ok(());
    }

    // 1. Open (or resume) the session
    let session = practice::start_session(db, user)?;
    let session_id = session.id;
    log::debug!("Practicing in session {}", session_id);

    // 2. Make sure it gets closed if anything below fails
    let mut guard = scopeguard::guard(db, |db| {
        if let Err(e) = practice::end_session(db, user, session_id) {
            log::warn!("Could not end study session {}: {}", session_id, e);
        }
    });

    practice_loop(&mut guard, user, session_id)?;

    // 3. Normal exit: close it here to show the summary
    let db = ScopeGuard::into_inner(guard);
    let summary = practice::end_session(db, user, session_id)?;
    println!("\n{}", t!("practice.info.session_ended").bold());
    println!(
        "  {}",
        format!(
            t!("practice.info.summary"),
            answered = summary.answered,
            correct = summary.correct,
            minutes = summary.duration_minutes
        )
    );
    Ok(())
}

fn practice_loop(db: &mut Database, user: &User, session_id: i64) -> Result<()> {
    let theme = commons::theme();
    loop {
        let board = practice::board(db, user)?;
        commons::print_board(&board);
        if board.is_complete() {
            println!("\n  {}", t!("practice.success.all_correct").green().bold());
            return Ok(());
        }

        let mut items: Vec<String> = board
            .entries
            .iter()
            .map(|e| format!("#{:<4} {}  [{}]", e.flashcard.id, e.flashcard.question, e.status))
            .collect();
        items.push(t!("common.action.exit").to_string());

        let choice = Select::with_theme(&theme)
            .with_prompt(t!("practice.prompt.select"))
            .items(&items)
            .default(0)
            .interact_opt()?;
        // Esc and the trailing "Exit" item both end the session.
        let Some(entry) = choice.and_then(|i| board.entries.get(i)) else {
            return Ok(());
        };

        if entry.status == PracticeStatus::Correct {
            println!("\n  {}", t!("practice.warning.already_correct").yellow());
            continue;
        }

        println!("\n  {}", entry.flashcard.question.bold());
        let given: String = Input::with_theme(&theme)
            .with_prompt(t!("practice.prompt.answer"))
            .allow_empty(true)
            .interact_text()?;

        match practice::answer(db, user, session_id, entry.flashcard.id, &given) {
            Ok(outcome) if outcome.correct => {
                println!("  {}", t!("practice.success.correct").green().bold());
            }
            Ok(outcome) => {
                println!(
                    "  {}",
                    format!(t!("practice.info.incorrect"), expected = outcome.expected.cyan()).red()
                );
            }
            Err(e) => commons::report_rejection(Err(e))?,
        }
    }
}
