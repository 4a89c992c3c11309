use anyhow::{Result, anyhow};

use crate::{cli::handlers, state::AppContext};

// --- Command Definition and Registry ---

/// A top-level command, its aliases, and the handler that receives the remaining arguments.
struct CommandDefinition {
    name: &'static str,
    aliases: &'static [&'static str],
    handler: fn(Vec<String>, &mut AppContext) -> Result<()>,
}

/// The single source of truth for all commands.
static COMMAND_REGISTRY: &[CommandDefinition] = &[
    CommandDefinition {
        name: "register",
        aliases: &["reg"],
        handler: handlers::register::handle,
    },
    CommandDefinition {
        name: "menu",
        aliases: &["interactive", "i"],
        handler: handlers::menu::handle,
    },
    CommandDefinition {
        name: "list",
        aliases: &["ls"],
        handler: handlers::list::handle,
    },
    CommandDefinition {
        name: "create",
        aliases: &["new"],
        handler: handlers::create::handle,
    },
    CommandDefinition {
        name: "delete",
        aliases: &["del", "rm"],
        handler: handlers::delete::handle,
    },
    CommandDefinition {
        name: "restore",
        aliases: &[],
        handler: handlers::restore::handle,
    },
    CommandDefinition {
        name: "trash",
        aliases: &[],
        handler: handlers::trash::handle,
    },
    CommandDefinition {
        name: "practice",
        aliases: &[],
        handler: handlers::practice::handle,
    },
    CommandDefinition {
        name: "stats",
        aliases: &[],
        handler: handlers::stats::handle,
    },
    CommandDefinition {
        name: "reset",
        aliases: &[],
        handler: handlers::reset::handle,
    },
    CommandDefinition {
        name: "logs",
        aliases: &[],
        handler: handlers::logs::handle,
    },
    CommandDefinition {
        name: "import",
        aliases: &[],
        handler: handlers::import::handle,
    },
    CommandDefinition {
        name: "serve",
        aliases: &[],
        handler: handlers::serve::handle,
    },
    CommandDefinition {
        name: "help",
        aliases: &[],
        handler: handlers::help::handle,
    },
];

/// Finds a command definition in the registry by its name or alias.
fn find_command(name: &str) -> Option<&'static CommandDefinition> {
    COMMAND_REGISTRY
        .iter()
        .find(|cmd| cmd.name == name || cmd.aliases.contains(&name))
}

/// Routes `recall <command> [args...]`. No command at all opens the interactive menu.
pub fn dispatch(all_args: Vec<String>, ctx: &mut AppContext) -> Result<()> {
    log::debug!("Dispatching args: {:?}", all_args);

    let mut args = all_args.into_iter();
    let Some(name) = args.next() else {
        return handlers::menu::handle(Vec::new(), ctx);
    };

    let command = find_command(&name)
        .ok_or_else(|| anyhow!(format!(t!("error.unknown_command"), command = name)))?;
    (command.handler)(args.collect(), ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_resolve_to_their_command() {
        assert_eq!(find_command("rm").map(|c| c.name), Some("delete"));
        assert_eq!(find_command("i").map(|c| c.name), Some("menu"));
        assert_eq!(find_command("ls").map(|c| c.name), Some("list"));
        assert!(find_command("frobnicate").is_none());
    }

    #[test]
    fn test_names_and_aliases_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for cmd in COMMAND_REGISTRY {
            assert!(seen.insert(cmd.name), "duplicate {}", cmd.name);
            for alias in cmd.aliases {
                assert!(seen.insert(*alias), "duplicate {}", alias);
            }
        }
    }

    #[test]
    fn test_unknown_command_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = AppContext::new(Default::default(), dir.path().to_path_buf());
        let err = dispatch(vec!["frobnicate".into()], &mut ctx).unwrap_err();
        assert!(err.to_string().contains("frobnicate"));
    }
}
