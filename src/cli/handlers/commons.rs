// src/cli/handlers/commons.rs

// Prompts and printers shared by several handlers.

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Confirm, Input, Password, Select, theme::ColorfulTheme};
use thiserror::Error;

use crate::{
    core::{
        session_cache,
        validation::{self, ValidationRules},
    },
    models::{Flashcard, PracticeBoard, PracticeStatus, User},
    services::{ServiceError, users},
    state::AppContext,
};

/// The user backed out of a prompt. `main` exits quietly with code 130.
#[derive(Error, Debug)]
#[error("Operation cancelled.")]
pub struct Cancelled;

/// True for errors that mean "the user interrupted", not "something failed".
pub fn is_cancellation(e: &anyhow::Error) -> bool {
    if e.downcast_ref::<Cancelled>().is_some() {
        return true;
    }
    matches!(
        e.downcast_ref::<dialoguer::Error>(),
        Some(dialoguer::Error::IO(io)) if io.kind() == std::io::ErrorKind::Interrupted
    )
}

pub fn theme() -> ColorfulTheme {
    ColorfulTheme::default()
}

// --- Authentication ---

/// Asks for the password (and the email if not given) and authenticates.
/// A successful login remembers the email for next time.
pub fn login(ctx: &mut AppContext, email: Option<String>) -> Result<User> {
    let email = match email {
        Some(email) => email,
        None => {
            let theme = theme();
            let mut input = Input::<String>::with_theme(&theme).with_prompt(t!("common.prompt.email"));
            if let Some(last) = session_cache::last_email(&ctx.config_dir) {
                input = input.default(last);
            }
            input.interact_text()?
        }
    };
    let password = Password::with_theme(&theme())
        .with_prompt(t!("common.prompt.password"))
        .interact()?;

    let user = users::authenticate(ctx.db()?, &email, &password)?;

    if let Err(e) = session_cache::write_remembered_login(&ctx.config_dir, &user.email) {
        log::warn!("Could not remember login: {}", e);
    }
    println!(
        "{}",
        format!(t!("common.info.logged_in"), name = user.name.cyan().bold()).dimmed()
    );
    Ok(user)
}

// --- Validated input ---

/// Prompts until the text satisfies `check`, printing each rejection.
fn prompt_validated<F>(prompt: &str, initial: Option<&str>, check: F) -> Result<String>
where
    F: Fn(&str) -> Result<String, validation::ValidationError>,
{
    let theme = theme();
    loop {
        let mut input = Input::<String>::with_theme(&theme).with_prompt(prompt);
        if let Some(initial) = initial {
            input = input.with_initial_text(initial);
        }
        let raw = input.interact_text()?;
        match check(&raw) {
            Ok(value) => return Ok(value),
            Err(e) => println!("  {}", e.to_string().red()),
        }
    }
}

pub fn prompt_question(rules: &ValidationRules, initial: Option<&str>) -> Result<String> {
    prompt_validated(t!("flashcard.prompt.question"), initial, |q| {
        validation::validate_question(rules, q)
    })
}

pub fn prompt_answer(rules: &ValidationRules, initial: Option<&str>) -> Result<String> {
    prompt_validated(t!("flashcard.prompt.answer"), initial, |a| {
        validation::validate_answer(rules, a)
    })
}

pub fn prompt_name() -> Result<String> {
    prompt_validated(t!("register.prompt.name"), None, validation::validate_name)
}

pub fn prompt_email() -> Result<String> {
    prompt_validated(t!("common.prompt.email"), None, validation::validate_email)
}

pub fn prompt_new_password() -> Result<String> {
    loop {
        let password = Password::with_theme(&theme())
            .with_prompt(t!("common.prompt.password"))
            .with_confirmation(
                t!("register.prompt.confirm_password"),
                t!("register.error.password_mismatch"),
            )
            .interact()?;
        match validation::validate_password(&password) {
            Ok(()) => return Ok(password),
            Err(e) => println!("  {}", e.to_string().red()),
        }
    }
}

pub fn confirm(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::with_theme(&theme())
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Lets the user pick one card. Esc is a [`Cancelled`] error.
pub fn select_flashcard<'a>(prompt: &str, cards: &'a [Flashcard]) -> Result<&'a Flashcard> {
    let items: Vec<String> = cards
        .iter()
        .map(|c| format!("#{:<4} {}", c.id, truncate(&c.question, 60)))
        .collect();
    let choice = Select::with_theme(&theme())
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact_opt()?;
    choice.and_then(|i| cards.get(i)).ok_or_else(|| Cancelled.into())
}

/// Turns a [`Cancelled`] error into `None`, for prompts nested in a loop
/// where Esc means "go back one level".
pub fn escaped<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is::<Cancelled>() => Ok(None),
        Err(e) => Err(e),
    }
}

// --- Output ---

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", cut)
}

pub fn print_flashcards(cards: &[Flashcard]) {
    if cards.is_empty() {
        println!("\n  {}", t!("flashcard.info.none").dimmed());
        return;
    }
    println!();
    println!(
        "  {:<6} {:<42} {}",
        "ID".blue().bold(),
        t!("flashcard.label.question").blue().bold(),
        t!("flashcard.label.answer").blue().bold()
    );
    for card in cards {
        println!(
            "  {:<6} {:<42} {}",
            card.id.to_string().yellow(),
            truncate(&card.question, 40),
            truncate(&card.answer, 30).dimmed()
        );
    }
}

pub fn print_trashed(cards: &[Flashcard]) {
    if cards.is_empty() {
        println!("\n  {}", t!("trash.info.empty").dimmed());
        return;
    }
    println!();
    for card in cards {
        let deleted = card
            .deleted_at
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        println!(
            "  {:<6} {:<42} {}",
            card.id.to_string().yellow(),
            truncate(&card.question, 40),
            format!(t!("trash.label.deleted_at"), date = deleted).dimmed()
        );
    }
}

pub fn print_board(board: &PracticeBoard) {
    println!();
    for entry in &board.entries {
        let status = match entry.status {
            PracticeStatus::Correct => entry.status.to_string().green(),
            PracticeStatus::Incorrect => entry.status.to_string().red(),
            PracticeStatus::NotAnswered => entry.status.to_string().dimmed(),
        };
        println!(
            "  {:<6} {:<42} {}",
            entry.flashcard.id.to_string().yellow(),
            truncate(&entry.flashcard.question, 40),
            status
        );
    }
    println!(
        "\n  {}",
        format!(
            t!("practice.info.completion"),
            percent = format!("{:.2}", board.completion_percentage()).bold()
        )
    );
}

/// Turns a service rejection into a short yellow line. Other errors pass through.
pub fn report_rejection(result: Result<(), ServiceError>) -> Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(
            e @ (ServiceError::Validation(_)
            | ServiceError::Forbidden(_)
            | ServiceError::Lifecycle(_)
            | ServiceError::NotFound { .. }
            | ServiceError::Conflict(_)),
        ) => {
            println!("\n  {}", e.to_string().yellow());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }

    #[test]
    fn test_cancellation_detection() {
        assert!(is_cancellation(&anyhow::Error::new(Cancelled)));
        assert!(!is_cancellation(&anyhow::anyhow!("boom")));
    }

    #[test]
    fn test_escaped_only_swallows_cancelled() {
        assert_eq!(escaped(Ok(3)).unwrap(), Some(3));
        assert_eq!(escaped::<i32>(Err(Cancelled.into())).unwrap(), None);
        assert!(escaped::<i32>(Err(anyhow::anyhow!("boom"))).is_err());
    }

    #[test]
    fn test_report_rejection_keeps_storage_errors() {
        let conflict = Err(ServiceError::Conflict("taken".into()));
        assert!(report_rejection(conflict).is_ok());
        assert!(report_rejection(Err(ServiceError::InvalidCredentials)).is_err());
    }
}
