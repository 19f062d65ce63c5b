//! Demonstration data shown on a first run.

use chrono::NaiveDate;
use rembees_domain::{NewTransaction, Transaction, TransactionId};

/// Five example transactions in their fixed demonstration order. Used only when
/// no transactions record has ever been written.
pub fn seed_transactions() -> Vec<Transaction> {
    let rows: [(&str, NewTransaction); 5] = [
        (
            "1",
            NewTransaction::income(15_000_000, "salary", "Gaji Bulanan", day(1)),
        ),
        (
            "2",
            NewTransaction::expense(150_000, "food", "Makan Malam", day(2)),
        ),
        (
            "3",
            NewTransaction::expense(50_000, "transport", "Ojek Online", day(3)),
        ),
        (
            "4",
            NewTransaction::expense(1_200_000, "shopping", "Sepatu Baru", day(4)),
        ),
        (
            "5",
            NewTransaction::expense(350_000, "utilities", "Tagihan Listrik", day(5)),
        ),
    ];
    rows.into_iter()
        .map(|(id, fields)| Transaction::with_id(TransactionId::new(id), fields))
        .collect()
}

fn day(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, day).unwrap_or_default()
}
