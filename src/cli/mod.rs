//! Command line front-end over the finance store.

pub mod args;
pub mod commands;
pub mod output;

use std::env;

use crate::{app::AppContext, errors::AppError};
use commands::{CommandHandler, CommandRegistry};

pub type CommandResult = Result<(), AppError>;

/// Runs the command named by the process arguments.
pub fn run_cli() -> CommandResult {
    let args: Vec<String> = env::args().skip(1).collect();
    run_with_args(&args)
}

/// Dispatches `args` (without the program name) against a store opened from
/// the environment.
pub fn run_with_args(args: &[String]) -> CommandResult {
    let registry = CommandRegistry::new(commands::all_definitions());
    let Some((name, rest)) = args.split_first() else {
        commands::system::print_overview(&registry);
        return Ok(());
    };

    let name = name.to_lowercase();
    let Some(command) = registry.get(&name) else {
        return Err(AppError::Usage(format!(
            "unknown command `{}`. Run `rembees help` for the command list.",
            name
        )));
    };

    let rest: Vec<&str> = rest.iter().map(String::as_str).collect();
    match command.handler {
        CommandHandler::Registry(handler) => handler(&registry, &rest),
        CommandHandler::Store(handler) => {
            let mut context = AppContext::open_from_env()?;
            report_migrations(&context);
            let outcome = handler(&mut context, &rest);
            let closed = context.close();
            outcome.and(closed)
        }
    }
}

// Rejected records are already logged at `warn` by the store.
fn report_migrations(context: &AppContext) {
    let report = context.store.load_report();
    for slice in &report.migrated {
        output::info(format!("Upgraded stored {} record to the current format.", slice));
    }
}
