//! Domain models for income and expense transactions.

use std::fmt;

use chrono::NaiveDate;
use serde::{
    de::{self, Deserializer, Visitor},
    Deserialize, Serialize,
};
use uuid::Uuid;

use crate::{
    category::Category,
    common::{Amounted, Displayable},
};

/// Opaque transaction identifier.
///
/// Fresh identifiers are UUID v4 strings, but any string loaded from storage is
/// accepted as-is so older records keep their ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TransactionId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Direction of a transaction. Determines the sign it contributes to the balance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    pub fn from_str_opt(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Some(TransactionType::Income),
            "expense" => Some(TransactionType::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single dated income or expense entry, denominated in whole Rupiah.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(deserialize_with = "coerce_amount")]
    pub amount: u64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_as_none"
    )]
    pub receipt: Option<String>,
}

impl Transaction {
    /// Builds a stored transaction from caller-supplied fields and a fresh id.
    pub fn from_new(fields: NewTransaction) -> Self {
        Self::with_id(TransactionId::generate(), fields)
    }

    pub fn with_id(id: TransactionId, fields: NewTransaction) -> Self {
        Self {
            id,
            amount: fields.amount,
            kind: fields.kind,
            category: fields.category,
            description: fields.description,
            date: fields.date,
            receipt: fields.receipt.filter(|payload| !payload.is_empty()),
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Amount with the sign implied by the transaction type.
    pub fn signed_amount(&self) -> i128 {
        match self.kind {
            TransactionType::Income => i128::from(self.amount),
            TransactionType::Expense => -i128::from(self.amount),
        }
    }

    /// Catalog entry used for display. Unknown ids resolve to [`Category::Other`].
    pub fn resolved_category(&self) -> Category {
        Category::resolve(&self.category)
    }
}

impl Amounted for Transaction {
    fn amount(&self) -> u64 {
        self.amount
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        let label = if self.description.is_empty() {
            self.resolved_category().info().name
        } else {
            self.description.as_str()
        };
        format!("{} {} [{}]", self.date, label, self.kind)
    }
}

/// Caller-supplied transaction fields. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub amount: u64,
    pub kind: TransactionType,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
    pub receipt: Option<String>,
}

impl NewTransaction {
    pub fn new(
        kind: TransactionType,
        amount: u64,
        category: impl Into<String>,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            amount,
            kind,
            category: category.into(),
            description: description.into(),
            date,
            receipt: None,
        }
    }

    pub fn income(
        amount: u64,
        category: impl Into<String>,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self::new(TransactionType::Income, amount, category, description, date)
    }

    pub fn expense(
        amount: u64,
        category: impl Into<String>,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self::new(TransactionType::Expense, amount, category, description, date)
    }

    pub fn with_receipt(mut self, receipt: impl Into<String>) -> Self {
        self.receipt = Some(receipt.into());
        self
    }
}

/// Accepts integers, floats and numeric strings; stores the rounded magnitude.
fn coerce_amount<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    struct AmountVisitor;

    impl<'de> Visitor<'de> for AmountVisitor {
        type Value = u64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a numeric amount")
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<u64, E> {
            Ok(value)
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<u64, E> {
            Ok(value.unsigned_abs())
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<u64, E> {
            if !value.is_finite() {
                return Err(E::custom(format!("amount `{value}` is not finite")));
            }
            // `as` saturates for out-of-range floats.
            Ok(value.abs().round() as u64)
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<u64, E> {
            let parsed: f64 = value
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("amount `{value}` is not a number")))?;
            self.visit_f64(parsed)
        }
    }

    deserializer.deserialize_any(AmountVisitor)
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|payload| !payload.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = TransactionId::generate();
        let b = TransactionId::generate();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn serializes_with_type_field_and_iso_date() {
        let txn = Transaction::with_id(
            TransactionId::new("1"),
            NewTransaction::income(15_000_000, "salary", "Gaji Bulanan", date(2024, 3, 1)),
        );
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["type"], "income");
        assert_eq!(json["date"], "2024-03-01");
        assert_eq!(json["id"], "1");
        assert!(json.get("receipt").is_none());
    }

    #[test]
    fn amount_coercion_accepts_floats_strings_and_negatives() {
        let raw = r#"[
            {"id":"a","amount":1500.6,"type":"expense","category":"food","description":"","date":"2024-03-02"},
            {"id":"b","amount":"20000","type":"income","category":"salary","description":"x","date":"2024-03-01"},
            {"id":"c","amount":-300,"type":"expense","category":"food","description":"y","date":"2024-03-03"}
        ]"#;
        let txns: Vec<Transaction> = serde_json::from_str(raw).unwrap();
        assert_eq!(txns[0].amount, 1501);
        assert_eq!(txns[1].amount, 20_000);
        assert_eq!(txns[2].amount, 300);
    }

    #[test]
    fn non_numeric_amount_is_rejected() {
        let raw = r#"{"id":"a","amount":"lots","type":"expense","category":"food","date":"2024-03-02"}"#;
        assert!(serde_json::from_str::<Transaction>(raw).is_err());
    }

    #[test]
    fn empty_receipt_loads_as_absent() {
        let raw = r#"{"id":"a","amount":1,"type":"expense","category":"food","description":"","date":"2024-03-02","receipt":""}"#;
        let txn: Transaction = serde_json::from_str(raw).unwrap();
        assert_eq!(txn.receipt, None);
    }

    #[test]
    fn signed_amount_follows_type() {
        let expense = Transaction::from_new(NewTransaction::expense(
            150_000,
            "food",
            "Makan Malam",
            date(2024, 3, 2),
        ));
        assert_eq!(expense.signed_amount(), -150_000);
        assert!(expense.is_expense());
    }

    #[test]
    fn display_label_falls_back_to_category_name() {
        let txn = Transaction::from_new(NewTransaction::expense(1, "mystery", "", date(2024, 1, 1)));
        assert_eq!(txn.display_label(), "2024-01-01 Lainnya [expense]");
    }
}
