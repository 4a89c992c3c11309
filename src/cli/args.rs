// src/cli/args.rs
use clap::{Args, Parser};

/// Identifies the account a command acts for. The password is always prompted.
#[derive(Args, Debug, Default, Clone)]
pub struct AccountArgs {
    /// Email of the account. Defaults to the last one used.
    #[arg(long, short)]
    pub email: Option<String>,
}

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Creates a new account.")]
pub struct RegisterArgs {
    /// Display name. Asked interactively when missing.
    #[arg(long)]
    pub name: Option<String>,

    /// Email address. Asked interactively when missing.
    #[arg(long, short)]
    pub email: Option<String>,
}

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Opens the interactive main menu.")]
pub struct MenuArgs {
    #[command(flatten)]
    pub account: AccountArgs,
}

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Lists your flashcards.")]
pub struct ListArgs {
    #[command(flatten)]
    pub account: AccountArgs,

    /// Show the trash bin instead of the active cards.
    #[arg(long)]
    pub trashed: bool,
}

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Creates a flashcard.")]
pub struct CreateArgs {
    #[command(flatten)]
    pub account: AccountArgs,

    /// The question. Asked interactively when missing.
    #[arg(long, short)]
    pub question: Option<String>,

    /// The answer. Asked interactively when missing.
    #[arg(long, short)]
    pub answer: Option<String>,
}

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Moves a flashcard to the trash bin, or purges it.")]
pub struct DeleteArgs {
    /// Id of the card. Picked from a list when missing.
    pub id: Option<i64>,

    #[command(flatten)]
    pub account: AccountArgs,

    /// Delete permanently instead of moving to the trash bin.
    #[arg(long)]
    pub force: bool,

    /// Do not ask for confirmation.
    #[arg(long, short)]
    pub yes: bool,
}

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Restores a flashcard from the trash bin.")]
pub struct RestoreArgs {
    /// Id of the card. Picked from the trash bin when missing.
    pub id: Option<i64>,

    #[command(flatten)]
    pub account: AccountArgs,

    /// Restore every card in the trash bin.
    #[arg(long, conflicts_with = "id")]
    pub all: bool,
}

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Manages the trash bin interactively.")]
pub struct TrashArgs {
    #[command(flatten)]
    pub account: AccountArgs,
}

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Practices your flashcards.")]
pub struct PracticeArgs {
    #[command(flatten)]
    pub account: AccountArgs,
}

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Shows your statistics.")]
pub struct StatsArgs {
    #[command(flatten)]
    pub account: AccountArgs,

    /// Recompute the stored counters from your data first.
    #[arg(long)]
    pub reconcile: bool,
}

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Erases all practice progress.")]
pub struct ResetArgs {
    #[command(flatten)]
    pub account: AccountArgs,

    /// Do not ask for confirmation.
    #[arg(long, short)]
    pub yes: bool,
}

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Shows your most recent activity.")]
pub struct LogsArgs {
    #[command(flatten)]
    pub account: AccountArgs,

    /// How many entries to show. Defaults to `logs.default_limit` from the config.
    #[arg(long, short)]
    pub limit: Option<usize>,

    /// Only show entries of this level (info, warning, error).
    #[arg(long)]
    pub level: Option<String>,
}

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Imports flashcards from a CSV file.")]
pub struct ImportArgs {
    /// Path to a CSV file with `question` and `answer` columns.
    pub path: String,

    #[command(flatten)]
    pub account: AccountArgs,
}

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Starts the HTTP JSON API.")]
pub struct ServeArgs {
    /// Address to listen on. Defaults to `server.bind` from the config.
    #[arg(long)]
    pub bind: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_args() {
        let args = DeleteArgs::try_parse_from(["7", "--force", "--email", "ada@example.com"]).unwrap();
        assert_eq!(args.id, Some(7));
        assert!(args.force);
        assert_eq!(args.account.email.as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn test_restore_all_conflicts_with_id() {
        assert!(RestoreArgs::try_parse_from(["3", "--all"]).is_err());
        assert!(RestoreArgs::try_parse_from(["--all"]).unwrap().all);
    }

    #[test]
    fn test_logs_args() {
        let args = LogsArgs::try_parse_from(["--limit", "5", "--level", "warning"]).unwrap();
        assert_eq!(args.limit, Some(5));
        assert_eq!(args.level.as_deref(), Some("warning"));
    }
}
