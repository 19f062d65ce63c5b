//! CSV export of the transaction list.
//!
//! Receipts are left out; every other field is written as a quoted column.

use std::path::Path;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use rembees_domain::Transaction;

use crate::CoreError;

pub const EXPORT_HEADERS: [&str; 6] = ["id", "amount", "type", "category", "description", "date"];

pub fn default_export_file_name() -> &'static str {
    "transaksi.csv"
}

/// Renders the transactions as CSV text, header first. An empty list yields
/// only the header row.
pub fn export_csv(transactions: &[Transaction]) -> Result<String, CoreError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    write_rows(&mut writer, transactions)?;
    let bytes = writer
        .into_inner()
        .map_err(|err| CoreError::Export(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| CoreError::Export(err.to_string()))
}

pub fn export_csv_to_path(transactions: &[Transaction], path: &Path) -> Result<(), CoreError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_path(path)?;
    write_rows(&mut writer, transactions)?;
    writer.flush()?;
    tracing::debug!(path = %path.display(), rows = transactions.len(), "exported transactions");
    Ok(())
}

fn write_rows<W: std::io::Write>(
    writer: &mut csv::Writer<W>,
    transactions: &[Transaction],
) -> Result<(), CoreError> {
    writer.write_record(EXPORT_HEADERS)?;
    for txn in transactions {
        let amount = txn.amount.to_string();
        let date = txn.date.format("%Y-%m-%d").to_string();
        writer.write_record([
            txn.id.as_str(),
            amount.as_str(),
            txn.kind.as_str(),
            txn.category.as_str(),
            txn.description.as_str(),
            date.as_str(),
        ])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rembees_domain::{NewTransaction, TransactionId};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn every_field_is_quoted_and_quotes_are_doubled() {
        let txn = Transaction::with_id(
            TransactionId::new("abc"),
            NewTransaction::expense(150_000, "food", r#"Nasi "spesial""#, date(2)),
        );
        let csv = export_csv(&[txn]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some(r#""id","amount","type","category","description","date""#)
        );
        assert_eq!(
            lines.next(),
            Some(r#""abc","150000","expense","food","Nasi ""spesial""","2024-03-02""#)
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn receipts_never_reach_the_export() {
        let payload = "data:image/png;base64,iVBORw0KGgo=";
        let txns = vec![
            Transaction::from_new(
                NewTransaction::expense(10, "food", "lunch", date(3)).with_receipt(payload),
            ),
            Transaction::from_new(NewTransaction::income(20, "salary", "pay", date(1))),
        ];
        let csv = export_csv(&txns).unwrap();
        assert_eq!(csv.lines().count(), 3);
        assert!(!csv.contains(payload));
        assert!(!csv.contains("receipt"));
    }

    #[test]
    fn empty_list_exports_header_only() {
        let csv = export_csv(&[]).unwrap();
        assert_eq!(csv, "\"id\",\"amount\",\"type\",\"category\",\"description\",\"date\"\n");
    }

    #[test]
    fn file_export_matches_text_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(default_export_file_name());
        let txns = vec![Transaction::from_new(NewTransaction::income(
            5,
            "salary",
            "pay, with comma",
            date(1),
        ))];
        export_csv_to_path(&txns, &path).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            export_csv(&txns).unwrap()
        );
    }
}
