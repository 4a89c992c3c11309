// src/cli/handlers/stats.rs

use anyhow::Result;
use clap::Parser;
use colored::*;

use super::commons;
use crate::{cli::args::StatsArgs, models::User, services::statistics, state::AppContext};

pub fn handle(args: Vec<String>, ctx: &mut AppContext) -> Result<()> {
    let stats_args = StatsArgs::try_parse_from(&args)?;
    let user = commons::login(ctx, stats_args.account.email)?;

    if stats_args.reconcile {
        statistics::reconcile(ctx.db()?, &user)?;
        println!("\n  {}", t!("stats.success.reconciled").green());
    }
    show(ctx, &user)
}

pub fn show(ctx: &mut AppContext, user: &User) -> Result<()> {
    let report = statistics::report(ctx.db()?, user)?;
    let c = &report.counters;

    println!("\n{}", t!("stats.info.header").bold());
    println!("  {:<24} {}", t!("stats.label.flashcards").blue(), c.total_flashcards);
    println!("  {:<24} {}", t!("stats.label.sessions").blue(), c.total_study_sessions);
    println!(
        "  {:<24} {} ({:.2}%)",
        t!("stats.label.correct").blue(),
        c.total_correct_answers.to_string().green(),
        report.correct_percentage
    );
    println!(
        "  {:<24} {} ({:.2}%)",
        t!("stats.label.incorrect").blue(),
        c.total_incorrect_answers.to_string().red(),
        report.incorrect_percentage
    );

    println!("\n{}", t!("stats.info.progress_header").bold());
    println!("  {:<24} {}", t!("stats.label.active_cards").blue(), report.active_flashcards);
    println!("  {:<24} {:.2}%", t!("stats.label.answered").blue(), report.answered_percentage);
    println!("  {:<24} {:.2}%", t!("stats.label.completed").blue(), report.completion_percentage);

    if i64::try_from(report.active_flashcards).ok() != Some(c.total_flashcards) {
        println!("\n  {}", t!("stats.warning.drift").yellow());
    }
    Ok(())
}
