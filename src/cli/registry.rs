use std::collections::HashMap;

use crate::cli::core::{CommandResult, ShellContext};
use crate::domain::EntityKind;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

#[derive(Clone)]
pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
    /// Offered by tab completion after the command name.
    pub subcommands: &'static [&'static str],
    /// Record kind whose ids complete the argument of `id_subcommands`.
    pub records: Option<EntityKind>,
    pub id_subcommands: &'static [&'static str],
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
            subcommands: &[],
            records: None,
            id_subcommands: &[],
        }
    }

    pub const fn with_subcommands(self, subcommands: &'static [&'static str]) -> Self {
        Self {
            subcommands,
            ..self
        }
    }

    pub const fn with_record_ids(
        self,
        kind: EntityKind,
        id_subcommands: &'static [&'static str],
    ) -> Self {
        Self {
            records: Some(kind),
            id_subcommands,
            ..self
        }
    }

    /// Whether the argument after `subcommand` is a record id.
    pub fn takes_id(&self, subcommand: &str) -> Option<EntityKind> {
        self.records
            .filter(|_| self.id_subcommands.contains(&subcommand))
    }
}

/// Commands by name, listed in registration order.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandEntry>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entry: CommandEntry) {
        if self.commands.insert(entry.name, entry.clone()).is_none() {
            self.order.push(entry.name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.commands.get(name)
    }

    pub fn handler(&self, name: &str) -> Option<CommandHandler> {
        self.get(name).map(|entry| entry.handler)
    }

    pub fn list(&self) -> impl Iterator<Item = &CommandEntry> {
        self.order
            .iter()
            .filter_map(move |name| self.commands.get(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &mut ShellContext, _: &[&str]) -> CommandResult {
        Ok(())
    }

    #[test]
    fn keeps_registration_order_without_duplicates() {
        let mut registry = CommandRegistry::new();
        registry.register(CommandEntry::new("help", "", "help", noop));
        registry.register(CommandEntry::new("debt", "", "debt", noop));
        registry.register(CommandEntry::new("help", "again", "help", noop));

        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["help", "debt"]);
        assert_eq!(registry.get("help").unwrap().description, "again");
        assert!(registry.handler("missing").is_none());
    }

    #[test]
    fn id_taking_subcommands_name_their_record_kind() {
        let entry = CommandEntry::new("goal", "", "goal", noop)
            .with_subcommands(&["list", "deposit", "remove"])
            .with_record_ids(EntityKind::Goal, &["deposit", "remove"]);
        assert_eq!(entry.takes_id("deposit"), Some(EntityKind::Goal));
        assert_eq!(entry.takes_id("list"), None);
        assert_eq!(
            CommandEntry::new("help", "", "help", noop).takes_id("remove"),
            None
        );
    }
}
