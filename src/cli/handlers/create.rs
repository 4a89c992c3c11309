// src/cli/handlers/create.rs

use anyhow::Result;
use clap::Parser;
use colored::*;

use super::commons;
use crate::{
    cli::args::CreateArgs,
    models::{Flashcard, User},
    services::flashcards,
    state::AppContext,
};

pub fn handle(args: Vec<String>, ctx: &mut AppContext) -> Result<()> {
    let create_args = CreateArgs::try_parse_from(&args)?;
    let user = commons::login(ctx, create_args.account.email)?;

    let card = match (create_args.question, create_args.answer) {
        // Fully scripted: invalid input is an error, not a prompt.
        (Some(question), Some(answer)) => {
            let rules = ctx.config.validation.clone();
            flashcards::create(ctx.db()?, &rules, &user, &question, &answer)?
        }
        (question, answer) => prompt_and_create(ctx, &user, question.as_deref(), answer.as_deref())?,
    };
    print_created(&card);
    Ok(())
}

/// The interactive flow used by the menu.
pub fn run(ctx: &mut AppContext, user: &User) -> Result<()> {
    let card = prompt_and_create(ctx, user, None, None)?;
    print_created(&card);
    Ok(())
}

/// Asks for the missing fields, re-prompting until both pass validation.
fn prompt_and_create(
    ctx: &mut AppContext,
    user: &User,
    question: Option<&str>,
    answer: Option<&str>,
) -> Result<Flashcard> {
    let rules = ctx.config.validation.clone();
    let question = commons::prompt_question(&rules, question)?;
    let answer = commons::prompt_answer(&rules, answer)?;
    Ok(flashcards::create(ctx.db()?, &rules, user, &question, &answer)?)
}

fn print_created(card: &Flashcard) {
    println!("\n{}", t!("common.success").green().bold());
    println!(
        "  {}",
        format!(t!("create.success.created"), id = card.id.to_string().yellow())
    );
}
