use crate::{
    cli::{output, CommandResult},
    errors::AppError,
};

use super::{CommandDefinition, CommandRegistry};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::registry(
        "help",
        "Show available commands",
        "help [command]",
        cmd_help,
    )]
}

fn cmd_help(registry: &CommandRegistry, args: &[&str]) -> CommandResult {
    let Some(name) = args.first() else {
        print_overview(registry);
        return Ok(());
    };
    let command = registry
        .get(&name.to_lowercase())
        .ok_or_else(|| AppError::Usage(format!("unknown command `{}`", name)))?;
    output::section(command.name);
    println!("{}", command.description);
    println!("Usage: rembees {}", command.usage);
    Ok(())
}

pub fn print_overview(registry: &CommandRegistry) {
    output::section("Rembees");
    println!("Usage: rembees <command> [arguments]");
    println!();
    for command in registry.iter() {
        println!("  {:<10} {}", command.name, command.description);
    }
}
