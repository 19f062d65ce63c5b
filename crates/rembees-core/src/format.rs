use chrono::NaiveDate;
use rembees_domain::{Transaction, TransactionType};

/// Formats currency amounts for presentation.
pub trait CurrencyFormatter: Send + Sync {
    fn format_amount(&self, amount: i128) -> String;
}

/// Formats dates for presentation.
pub trait DateFormatter: Send + Sync {
    fn format_date(&self, date: NaiveDate) -> String;
}

/// Indonesian Rupiah: `Rp` prefix, `.` thousands grouping, no fraction digits.
#[derive(Debug, Clone, Copy, Default)]
pub struct RupiahFormatter;

impl CurrencyFormatter for RupiahFormatter {
    fn format_amount(&self, amount: i128) -> String {
        let digits = group_thousands(amount.unsigned_abs(), '.');
        if amount < 0 {
            format!("-Rp {digits}")
        } else {
            format!("Rp {digits}")
        }
    }
}

/// `DD/MM/YYYY`, as used by the Indonesian locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndonesianDateFormatter;

impl DateFormatter for IndonesianDateFormatter {
    fn format_date(&self, date: NaiveDate) -> String {
        date.format("%d/%m/%Y").to_string()
    }
}

pub fn format_rupiah(amount: i128) -> String {
    RupiahFormatter.format_amount(amount)
}

/// List rendering: `+Rp 15.000.000` for income, `-Rp 150.000` for expense.
pub fn signed_label(transaction: &Transaction) -> String {
    let sign = match transaction.kind {
        TransactionType::Income => '+',
        TransactionType::Expense => '-',
    };
    format!("{sign}{}", format_rupiah(i128::from(transaction.amount)))
}

fn group_thousands(value: u128, separator: char) -> String {
    let raw = value.to_string();
    let mut grouped = String::with_capacity(raw.len() + raw.len() / 3);
    for (index, ch) in raw.chars().enumerate() {
        if index > 0 && (raw.len() - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rembees_domain::NewTransaction;

    #[test]
    fn groups_thousands_with_dots() {
        assert_eq!(format_rupiah(0), "Rp 0");
        assert_eq!(format_rupiah(999), "Rp 999");
        assert_eq!(format_rupiah(1_000), "Rp 1.000");
        assert_eq!(format_rupiah(14_850_000), "Rp 14.850.000");
    }

    #[test]
    fn negative_amounts_lead_with_minus() {
        assert_eq!(format_rupiah(-150_000), "-Rp 150.000");
    }

    #[test]
    fn signed_label_follows_type() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let expense = Transaction::from_new(NewTransaction::expense(150_000, "food", "", date));
        assert_eq!(signed_label(&expense), "-Rp 150.000");
    }

    #[test]
    fn dates_render_day_first() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        assert_eq!(IndonesianDateFormatter.format_date(date), "02/03/2024");
    }
}
