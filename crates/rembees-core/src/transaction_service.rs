use rembees_domain::{Transaction, TransactionType};

/// Search and type filter applied to the transaction list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub search: String,
    pub kind: Option<TransactionType>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn kind(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Case-insensitive match on description or category id, plus type.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = transaction.description.to_lowercase().contains(&needle)
            || transaction.category.to_lowercase().contains(&needle);
        let matches_kind = self.kind.map_or(true, |kind| transaction.kind == kind);
        matches_search && matches_kind
    }
}

pub struct TransactionService;

impl TransactionService {
    /// Keeps list order.
    pub fn filter<'a>(
        transactions: &'a [Transaction],
        filter: &TransactionFilter,
    ) -> Vec<&'a Transaction> {
        transactions
            .iter()
            .filter(|txn| filter.matches(txn))
            .collect()
    }

    pub fn find<'a>(transactions: &'a [Transaction], id: &str) -> Option<&'a Transaction> {
        transactions.iter().find(|txn| txn.id.as_str() == id)
    }
}
