use rembees_core::format_rupiah;
use rembees_domain::NamedEntity;

use crate::{
    app::AppContext,
    cli::{output, CommandResult},
    errors::AppError,
};

use super::{transaction::render_row, CommandDefinition};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "summary",
            "Show balance, totals and recent transactions",
            "summary",
            cmd_summary,
        ),
        CommandDefinition::new(
            "report",
            "Show expenses per category and monthly totals",
            "report",
            cmd_report,
        ),
    ]
}

fn cmd_summary(context: &mut AppContext, args: &[&str]) -> CommandResult {
    expect_no_args("summary", args)?;
    let summary = context.store.summary();

    output::section("Summary");
    println!(
        "  Balance       : {}",
        output::amount_cell(format_rupiah(summary.balance), summary.balance >= 0)
    );
    println!(
        "  Total income  : {}",
        output::amount_cell(format_rupiah(i128::from(summary.total_income)), true)
    );
    println!(
        "  Total expense : {}",
        output::amount_cell(format_rupiah(i128::from(summary.total_expense)), false)
    );

    let recent = context.store.recent(context.config.recent_limit);
    output::section("Recent transactions");
    if recent.is_empty() {
        output::info("No transactions yet.");
    }
    for transaction in recent {
        println!("{}", render_row(transaction));
    }
    Ok(())
}

fn cmd_report(context: &mut AppContext, args: &[&str]) -> CommandResult {
    expect_no_args("report", args)?;

    output::section("Expenses by category");
    let by_category = context.store.expense_by_category();
    if by_category.is_empty() {
        output::info("No expenses recorded.");
    }
    for entry in by_category {
        println!(
            "  {:<18} {}",
            entry.category.name(),
            format_rupiah(i128::from(entry.amount))
        );
    }

    output::section("Monthly totals");
    let months = context.store.monthly_totals();
    if months.is_empty() {
        output::info("No transactions recorded.");
    }
    for month in months {
        println!(
            "  {}  income {}  expense {}  net {}",
            month.label(),
            format_rupiah(i128::from(month.income)),
            format_rupiah(i128::from(month.expense)),
            output::amount_cell(format_rupiah(month.net()), month.net() >= 0)
        );
    }
    Ok(())
}

fn expect_no_args(command: &str, args: &[&str]) -> Result<(), AppError> {
    match args.first() {
        Some(extra) => Err(AppError::Usage(format!(
            "`{}` takes no arguments (got `{}`)",
            command, extra
        ))),
        None => Ok(()),
    }
}
