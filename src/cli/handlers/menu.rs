// src/cli/handlers/menu.rs

use anyhow::Result;
use clap::Parser;
use colored::*;
use dialoguer::Select;

use super::{commons, create, delete, list, logs, practice, reset, stats, trash};
use crate::{cli::args::MenuArgs, models::User, services::ServiceError, state::AppContext};

/// What the main loop does after an item has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuFlow {
    Continue,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    List,
    Create,
    Delete,
    Practice,
    Statistics,
    Trash,
    Logs,
    Reset,
    Exit,
}

impl MenuItem {
    const ALL: [Self; 9] = [
        Self::List,
        Self::Create,
        Self::Delete,
        Self::Practice,
        Self::Statistics,
        Self::Trash,
        Self::Logs,
        Self::Reset,
        Self::Exit,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::List => t!("menu.item.list"),
            Self::Create => t!("menu.item.create"),
            Self::Delete => t!("menu.item.delete"),
            Self::Practice => t!("menu.item.practice"),
            Self::Statistics => t!("menu.item.statistics"),
            Self::Trash => t!("menu.item.trash"),
            Self::Logs => t!("menu.item.logs"),
            Self::Reset => t!("menu.item.reset"),
            Self::Exit => t!("common.action.exit"),
        }
    }
}

pub fn handle(args: Vec<String>, ctx: &mut AppContext) -> Result<()> {
    let menu_args = MenuArgs::try_parse_from(&args)?;
    let user = commons::login(ctx, menu_args.account.email)?;

    let labels: Vec<&str> = MenuItem::ALL.iter().map(|i| i.label()).collect();
    loop {
        println!();
        let choice = Select::with_theme(&commons::theme())
            .with_prompt(format!(t!("menu.prompt.title"), name = user.name))
            .items(&labels)
            .default(0)
            .interact_opt()?;
        let item = choice
            .and_then(|i| MenuItem::ALL.get(i).copied())
            .unwrap_or(MenuItem::Exit);

        if run_item(item, ctx, &user)? == MenuFlow::Exit {
            break;
        }
    }

    println!("\n{}", t!("menu.info.goodbye").dimmed());
    Ok(())
}

/// Runs one item. Service rejections are printed and the menu carries on.
fn run_item(item: MenuItem, ctx: &mut AppContext, user: &User) -> Result<MenuFlow> {
    settle(perform(item, ctx, user))
}

fn settle(outcome: Result<MenuFlow>) -> Result<MenuFlow> {
    match outcome {
        Ok(flow) => Ok(flow),
        // Esc in a picker goes back to the menu; Ctrl+C still leaves.
        Err(e) if e.is::<commons::Cancelled>() => {
            println!("\n  {}", t!("common.info.operation_cancelled").dimmed());
            Ok(MenuFlow::Continue)
        }
        Err(e) if commons::is_cancellation(&e) => Err(e),
        Err(e) => match e.downcast::<ServiceError>() {
            Ok(service_error) => {
                commons::report_rejection(Err(service_error))?;
                Ok(MenuFlow::Continue)
            }
            Err(e) => Err(e),
        },
    }
}

fn perform(item: MenuItem, ctx: &mut AppContext, user: &User) -> Result<MenuFlow> {
    log::debug!("Menu item selected: {:?}", item);
    match item {
        MenuItem::List => list::show(ctx, user)?,
        MenuItem::Create => create::run(ctx, user)?,
        MenuItem::Delete => delete::run(ctx, user)?,
        MenuItem::Practice => practice::run(ctx, user)?,
        MenuItem::Statistics => stats::show(ctx, user)?,
        MenuItem::Trash => trash::run(ctx, user)?,
        MenuItem::Logs => {
            let limit = ctx.config.logs.default_limit;
            logs::show(ctx, user, limit, None)?;
        }
        MenuItem::Reset => reset::run(ctx, user, false)?,
        MenuItem::Exit => return Ok(MenuFlow::Exit),
    }
    Ok(MenuFlow::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{config::Config, validation::ValidationRules},
        services::{flashcards, users},
        storage::Database,
    };

    fn context_with_user() -> (AppContext, User, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let mut db = Database::open_in_memory().unwrap();
        let user = users::register(&mut db, "Ada", "ada@example.com", "secret-password").unwrap();
        let ctx = AppContext::with_database(Config::default(), dir.path().to_path_buf(), db);
        (ctx, user, dir)
    }

    #[test]
    fn test_exit_ends_the_loop() {
        let (mut ctx, user, _dir) = context_with_user();
        assert_eq!(run_item(MenuItem::Exit, &mut ctx, &user).unwrap(), MenuFlow::Exit);
        assert_eq!(MenuItem::ALL.last(), Some(&MenuItem::Exit));
    }

    #[test]
    fn test_non_interactive_items_continue() {
        let (mut ctx, user, _dir) = context_with_user();
        flashcards::create(ctx.db().unwrap(), &ValidationRules::default(), &user, "Capital of France?", "Paris")
            .unwrap();

        for item in [MenuItem::List, MenuItem::Statistics, MenuItem::Logs] {
            assert_eq!(run_item(item, &mut ctx, &user).unwrap(), MenuFlow::Continue);
        }
    }

    #[test]
    fn test_escape_returns_to_the_menu() {
        let escaped = settle(Err(commons::Cancelled.into())).unwrap();
        assert_eq!(escaped, MenuFlow::Continue);

        let rejected = settle(Err(ServiceError::Conflict("taken".into()).into())).unwrap();
        assert_eq!(rejected, MenuFlow::Continue);

        assert!(settle(Err(anyhow::anyhow!("disk on fire"))).is_err());
    }
}
