use std::collections::BTreeMap;

use chrono::Datelike;
use rembees_domain::{Category, Transaction, TransactionType};

/// Derived totals over a transaction set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total_income: u64,
    pub total_expense: u64,
    pub balance: i128,
}

/// Expense total for one catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: Category,
    pub amount: u64,
}

/// Income and expense totals for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyTotal {
    pub year: i32,
    pub month: u32,
    pub income: u64,
    pub expense: u64,
}

impl MonthlyTotal {
    pub fn net(&self) -> i128 {
        i128::from(self.income) - i128::from(self.expense)
    }

    /// `YYYY-MM` label.
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

pub struct SummaryService;

impl SummaryService {
    pub fn summarize(transactions: &[Transaction]) -> Summary {
        let total_income = Self::total_for(transactions, TransactionType::Income);
        let total_expense = Self::total_for(transactions, TransactionType::Expense);
        Summary {
            total_income,
            total_expense,
            balance: i128::from(total_income) - i128::from(total_expense),
        }
    }

    /// Sum of amounts for one transaction type, saturating at `u64::MAX`.
    pub fn total_for(transactions: &[Transaction], kind: TransactionType) -> u64 {
        transactions
            .iter()
            .filter(|txn| txn.kind == kind)
            .fold(0u64, |acc, txn| acc.saturating_add(txn.amount))
    }

    /// Expense totals in catalog order, skipping empty categories. Unknown
    /// category ids are counted under the fallback entry.
    pub fn expense_by_category(transactions: &[Transaction]) -> Vec<CategoryTotal> {
        let mut totals: BTreeMap<Category, u64> = BTreeMap::new();
        for txn in transactions.iter().filter(|txn| txn.is_expense()) {
            let entry = totals.entry(txn.resolved_category()).or_default();
            *entry = entry.saturating_add(txn.amount);
        }
        Category::ALL
            .into_iter()
            .filter_map(|category| {
                totals
                    .get(&category)
                    .copied()
                    .filter(|amount| *amount > 0)
                    .map(|amount| CategoryTotal { category, amount })
            })
            .collect()
    }

    /// Per-month totals in chronological order, one row per month with activity.
    pub fn monthly_totals(transactions: &[Transaction]) -> Vec<MonthlyTotal> {
        let mut months: BTreeMap<(i32, u32), MonthlyTotal> = BTreeMap::new();
        for txn in transactions {
            let key = (txn.date.year(), txn.date.month());
            let row = months.entry(key).or_insert(MonthlyTotal {
                year: key.0,
                month: key.1,
                income: 0,
                expense: 0,
            });
            match txn.kind {
                TransactionType::Income => row.income = row.income.saturating_add(txn.amount),
                TransactionType::Expense => row.expense = row.expense.saturating_add(txn.amount),
            }
        }
        months.into_values().collect()
    }

    /// The first `limit` transactions, which are the newest ones.
    pub fn recent(transactions: &[Transaction], limit: usize) -> &[Transaction] {
        &transactions[..limit.min(transactions.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rembees_domain::NewTransaction;

    fn txn(fields: NewTransaction) -> Transaction {
        Transaction::from_new(fields)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_set_summarizes_to_zero() {
        assert_eq!(SummaryService::summarize(&[]), Summary::default());
    }

    #[test]
    fn balance_can_go_negative() {
        let txns = vec![
            txn(NewTransaction::income(100, "salary", "", date(2024, 1, 1))),
            txn(NewTransaction::expense(250, "food", "", date(2024, 1, 2))),
        ];
        let summary = SummaryService::summarize(&txns);
        assert_eq!(summary.balance, -150);
        assert_eq!(
            summary.balance,
            i128::from(summary.total_income) - i128::from(summary.total_expense)
        );
    }

    #[test]
    fn expense_by_category_uses_catalog_order_and_folds_unknown_ids() {
        let txns = vec![
            txn(NewTransaction::expense(50, "mystery", "", date(2024, 1, 1))),
            txn(NewTransaction::expense(30, "transport", "", date(2024, 1, 1))),
            txn(NewTransaction::expense(20, "food", "", date(2024, 1, 1))),
            txn(NewTransaction::expense(5, "other", "", date(2024, 1, 1))),
            txn(NewTransaction::income(999, "food", "", date(2024, 1, 1))),
        ];
        let totals = SummaryService::expense_by_category(&txns);
        assert_eq!(
            totals,
            vec![
                CategoryTotal {
                    category: Category::Food,
                    amount: 20
                },
                CategoryTotal {
                    category: Category::Transport,
                    amount: 30
                },
                CategoryTotal {
                    category: Category::Other,
                    amount: 55
                },
            ]
        );
    }

    #[test]
    fn zero_amount_expenses_are_not_reported() {
        let txns = vec![txn(NewTransaction::expense(0, "food", "", date(2024, 1, 1)))];
        assert!(SummaryService::expense_by_category(&txns).is_empty());
    }

    #[test]
    fn monthly_totals_are_chronological() {
        let txns = vec![
            txn(NewTransaction::expense(10, "food", "", date(2024, 3, 9))),
            txn(NewTransaction::income(500, "salary", "", date(2023, 12, 25))),
            txn(NewTransaction::income(100, "salary", "", date(2024, 3, 1))),
        ];
        let months = SummaryService::monthly_totals(&txns);
        assert_eq!(months.len(), 2);
        assert_eq!(months[0].label(), "2023-12");
        assert_eq!(months[1].label(), "2024-03");
        assert_eq!(months[1].income, 100);
        assert_eq!(months[1].expense, 10);
        assert_eq!(months[1].net(), 90);
    }

    #[test]
    fn recent_clamps_to_list_length() {
        let txns = vec![txn(NewTransaction::income(1, "salary", "", date(2024, 1, 1)))];
        assert_eq!(SummaryService::recent(&txns, 5).len(), 1);
        assert!(SummaryService::recent(&txns, 0).is_empty());
    }

    #[test]
    fn totals_saturate_instead_of_overflowing() {
        let txns = vec![
            txn(NewTransaction::income(u64::MAX, "salary", "", date(2024, 1, 1))),
            txn(NewTransaction::income(1, "salary", "", date(2024, 1, 1))),
        ];
        assert_eq!(SummaryService::summarize(&txns).total_income, u64::MAX);
    }
}
