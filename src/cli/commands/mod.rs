use std::collections::HashMap;

pub mod profile;
pub mod report;
pub mod system;
pub mod transaction;

use crate::{app::AppContext, cli::CommandResult};

pub(crate) fn all_definitions() -> Vec<CommandDefinition> {
    let mut commands = Vec::new();
    commands.extend(transaction::definitions());
    commands.extend(report::definitions());
    commands.extend(profile::definitions());
    commands.extend(system::definitions());
    commands
}

/// Store commands run against an opened [`AppContext`]; registry commands
/// only read the command table and never touch storage.
#[derive(Clone, Copy)]
pub enum CommandHandler {
    Store(fn(&mut AppContext, &[&str]) -> CommandResult),
    Registry(fn(&CommandRegistry, &[&str]) -> CommandResult),
}

#[derive(Clone)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandDefinition {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: fn(&mut AppContext, &[&str]) -> CommandResult,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler: CommandHandler::Store(handler),
        }
    }

    pub const fn registry(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: fn(&CommandRegistry, &[&str]) -> CommandResult,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler: CommandHandler::Registry(handler),
        }
    }
}

pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandDefinition>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn new(definitions: Vec<CommandDefinition>) -> Self {
        let mut commands = HashMap::new();
        let mut order = Vec::new();
        for definition in definitions {
            order.push(definition.name);
            commands.insert(definition.name, definition);
        }
        Self { commands, order }
    }

    pub fn get(&self, name: &str) -> Option<&CommandDefinition> {
        self.commands.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.order
            .iter()
            .filter_map(move |name| self.commands.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_keeps_definition_order_and_unique_names() {
        let registry = CommandRegistry::new(all_definitions());
        let names: Vec<_> = registry.iter().map(|command| command.name).collect();

        assert_eq!(names.first(), Some(&"list"));
        assert_eq!(names.last(), Some(&"help"));
        let mut deduped = names.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), names.len());
        assert!(registry.get("export").is_some());
        assert!(registry.get("ledger").is_none());
        assert!(matches!(
            registry.get("help").map(|command| command.handler),
            Some(CommandHandler::Registry(_))
        ));
    }
}
