use std::path::PathBuf;

use rembees_core::{
    default_export_file_name, export_csv_to_path, format_rupiah, signed_label, DateFormatter,
    IndonesianDateFormatter, TransactionFilter,
};
use rembees_domain::{
    Amounted, Category, Displayable, NewTransaction, Transaction, TransactionId, TransactionType,
};

use crate::{
    app::AppContext,
    cli::{
        args::{parse_amount, parse_date, ParsedArgs},
        output, CommandResult,
    },
    errors::AppError,
};

use super::CommandDefinition;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "list",
            "List transactions, newest first",
            "list [--search TEXT] [--type income|expense]",
            cmd_list,
        ),
        CommandDefinition::new(
            "add",
            "Record an income or expense",
            "add <income|expense> <amount> <category> <YYYY-MM-DD|today> [description...] [--receipt DATA]",
            cmd_add,
        ),
        CommandDefinition::new(
            "delete",
            "Delete a transaction by id",
            "delete <id>",
            cmd_delete,
        ),
        CommandDefinition::new(
            "export",
            "Write all transactions to a CSV file",
            "export [path]",
            cmd_export,
        ),
    ]
}

fn cmd_list(context: &mut AppContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &["--search", "--type"], &[])?;
    if let Some(extra) = parsed.positionals.first() {
        return Err(AppError::Usage(format!("unexpected argument `{}`", extra)));
    }

    let mut filter = TransactionFilter::new();
    if let Some(term) = parsed.value("--search") {
        filter = filter.search(term);
    }
    if let Some(kind) = parsed.value("--type") {
        filter = filter.kind(parse_kind(kind)?);
    }

    let matches = context.store.filter(&filter);
    if matches.is_empty() {
        output::info("No transactions found.");
        return Ok(());
    }
    output::section(format!("Transactions ({})", matches.len()));
    for transaction in matches {
        println!("{}", render_row(transaction));
    }
    Ok(())
}

fn cmd_add(context: &mut AppContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &["--receipt"], &[])?;
    let [kind, amount, category, date, description @ ..] = parsed.positionals.as_slice() else {
        return Err(AppError::Usage(
            "usage: add <income|expense> <amount> <category> <YYYY-MM-DD|today> [description...]"
                .into(),
        ));
    };

    let kind = parse_kind(kind)?;
    let amount = parse_amount(amount)?;
    let date = parse_date(date)?;
    if Category::from_id(category).is_none() {
        output::warning(format!(
            "Unknown category `{}`; it will be reported under {}.",
            category,
            Category::FALLBACK.info().name
        ));
    }

    let mut fields = NewTransaction::new(kind, amount, *category, description.join(" "), date);
    if let Some(receipt) = parsed.value("--receipt") {
        fields = fields.with_receipt(receipt);
    }
    let id = context.store.add_transaction(fields)?;
    output::success(format!("Transaction {} recorded.", id));
    Ok(())
}

fn cmd_delete(context: &mut AppContext, args: &[&str]) -> CommandResult {
    let [id] = args else {
        return Err(AppError::Usage("usage: delete <id>".into()));
    };
    let id = TransactionId::from(*id);
    let label = context.store.transaction(&id).map(|txn| {
        format!(
            "{}, {}",
            txn.display_label(),
            format_rupiah(i128::from(txn.amount()))
        )
    });
    if context.store.delete_transaction(&id)? {
        output::success(format!(
            "Transaction {} deleted ({}).",
            id,
            label.unwrap_or_default()
        ));
    } else {
        output::info(format!("No transaction with id {}.", id));
    }
    Ok(())
}

fn cmd_export(context: &mut AppContext, args: &[&str]) -> CommandResult {
    let path = match args {
        [] => PathBuf::from(default_export_file_name()),
        [path] => PathBuf::from(path),
        _ => return Err(AppError::Usage("usage: export [path]".into())),
    };
    let transactions = context.store.transactions();
    if transactions.is_empty() {
        return Err(AppError::Usage("there are no transactions to export".into()));
    }
    export_csv_to_path(transactions, &path)?;
    output::success(format!(
        "Exported {} transactions to {}.",
        transactions.len(),
        path.display()
    ));
    Ok(())
}

fn parse_kind(value: &str) -> Result<TransactionType, AppError> {
    TransactionType::from_str_opt(value).ok_or_else(|| {
        AppError::InvalidArgument(format!(
            "type `{}` must be `income` or `expense`",
            value
        ))
    })
}

pub(crate) fn render_row(transaction: &Transaction) -> String {
    let category = transaction.resolved_category().info().name;
    let description = if transaction.description.is_empty() {
        "-"
    } else {
        transaction.description.as_str()
    };
    let receipt = if transaction.receipt.is_some() { " [receipt]" } else { "" };
    format!(
        "{:<38} {}  {:<18} {}{}  {}",
        transaction.id.as_str(),
        IndonesianDateFormatter.format_date(transaction.date),
        category,
        description,
        receipt,
        output::amount_cell(signed_label(transaction), transaction.is_income())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn rows_show_resolved_category_and_signed_amount() {
        colored::control::set_override(false);
        let date = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let transaction = Transaction::with_id(
            TransactionId::new("2"),
            NewTransaction::expense(150_000, "groceries", "", date),
        );

        let row = render_row(&transaction);
        assert!(row.starts_with('2'));
        assert!(row.contains("02/03/2024"));
        assert!(row.contains("Lainnya"));
        assert!(row.ends_with("-Rp 150.000"));
    }

    #[test]
    fn kind_parsing_rejects_other_words() {
        assert_eq!(parse_kind("income").expect("kind"), TransactionType::Income);
        assert!(parse_kind("transfer").is_err());
    }
}
