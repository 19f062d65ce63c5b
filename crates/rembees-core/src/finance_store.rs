use std::{
    collections::{HashMap, HashSet},
    fmt,
};

use rembees_domain::{NewTransaction, Theme, Transaction, TransactionId, User, UserUpdate};

use crate::{
    export,
    seed::seed_transactions,
    snapshot::{self, THEME_SCHEMA_VERSION, TRANSACTIONS_SCHEMA_VERSION, USER_SCHEMA_VERSION},
    storage::{KeyValueStore, THEME_KEY, TRANSACTIONS_KEY, USER_KEY},
    summary_service::{CategoryTotal, MonthlyTotal, Summary, SummaryService},
    transaction_service::{TransactionFilter, TransactionService},
    CoreError,
};

/// One of the three independently persisted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slice {
    Transactions,
    User,
    Theme,
}

impl Slice {
    pub const ALL: [Slice; 3] = [Slice::Transactions, Slice::User, Slice::Theme];

    pub fn key(self) -> &'static str {
        match self {
            Slice::Transactions => TRANSACTIONS_KEY,
            Slice::User => USER_KEY,
            Slice::Theme => THEME_KEY,
        }
    }

    /// Where an unreadable record is copied before it is first overwritten.
    pub fn backup_key(self) -> &'static str {
        match self {
            Slice::Transactions => "rembees_transactions.unreadable",
            Slice::User => "rembees_user.unreadable",
            Slice::Theme => "rembees_theme.unreadable",
        }
    }
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Non-fatal problem found while opening the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    pub slice: Slice,
    pub message: String,
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.slice, self.message)
    }
}

/// Describes the outcome of opening the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub warnings: Vec<LoadWarning>,
    /// No transactions record existed, so first-run data was written.
    pub first_run: bool,
    /// Slices that were read from a pre-envelope record and rewritten.
    pub migrated: Vec<Slice>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// Populate demonstration transactions when no record exists yet.
    pub seed_on_first_run: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            seed_on_first_run: true,
        }
    }
}

/// Read-only view handed to collaborators.
#[derive(Debug, Clone, Copy)]
pub struct StoreSnapshot<'a> {
    pub transactions: &'a [Transaction],
    pub user: Option<&'a User>,
    pub theme: Theme,
    pub summary: Summary,
}

#[derive(Debug, Default)]
struct PendingWrites {
    transactions: bool,
    user: bool,
    theme: bool,
}

impl PendingWrites {
    fn flag(&mut self, slice: Slice) -> &mut bool {
        match slice {
            Slice::Transactions => &mut self.transactions,
            Slice::User => &mut self.user,
            Slice::Theme => &mut self.theme,
        }
    }

    fn is_set(&self, slice: Slice) -> bool {
        match slice {
            Slice::Transactions => self.transactions,
            Slice::User => self.user,
            Slice::Theme => self.theme,
        }
    }

    fn any(&self) -> bool {
        self.transactions || self.user || self.theme
    }
}

/// Owns the transaction list, the signed-in user and the theme, mirroring each
/// into a [`KeyValueStore`] after every mutation.
///
/// Mutations always apply in memory. When the follow-up write fails the error is
/// returned, the slice is remembered as pending, and [`FinanceStore::flush`] (or
/// dropping the store) retries it.
pub struct FinanceStore {
    transactions: Vec<Transaction>,
    user: Option<User>,
    theme: Theme,
    storage: Box<dyn KeyValueStore>,
    report: LoadReport,
    pending: PendingWrites,
    /// Slices rejected at open, with the raw record when it could be read.
    unreadable: HashMap<Slice, Option<String>>,
}

impl FinanceStore {
    pub fn open(storage: impl KeyValueStore + 'static) -> Self {
        Self::open_with(storage, StoreOptions::default())
    }

    /// Loads all three slices. Never fails: unreadable slices fall back to
    /// their first-run defaults and are reported in [`FinanceStore::load_report`].
    pub fn open_with(storage: impl KeyValueStore + 'static, options: StoreOptions) -> Self {
        let mut store = Self {
            transactions: Vec::new(),
            user: None,
            theme: Theme::default(),
            storage: Box::new(storage),
            report: LoadReport::default(),
            pending: PendingWrites::default(),
            unreadable: HashMap::new(),
        };
        store.load_transactions(options);
        store.load_user();
        store.load_theme();
        tracing::info!(
            transactions = store.transactions.len(),
            logged_in = store.user.is_some(),
            theme = %store.theme,
            warnings = store.report.warnings.len(),
            "finance store opened"
        );
        store
    }

    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }

    pub fn load_report(&self) -> &LoadReport {
        &self.report
    }

    /// Newest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn transaction(&self, id: &TransactionId) -> Option<&Transaction> {
        TransactionService::find(&self.transactions, id.as_str())
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn total_income(&self) -> u64 {
        self.summary().total_income
    }

    pub fn total_expense(&self) -> u64 {
        self.summary().total_expense
    }

    pub fn balance(&self) -> i128 {
        self.summary().balance
    }

    /// Recomputed from the current list on every call.
    pub fn summary(&self) -> Summary {
        SummaryService::summarize(&self.transactions)
    }

    pub fn snapshot(&self) -> StoreSnapshot<'_> {
        StoreSnapshot {
            transactions: &self.transactions,
            user: self.user.as_ref(),
            theme: self.theme,
            summary: self.summary(),
        }
    }

    pub fn recent(&self, limit: usize) -> &[Transaction] {
        SummaryService::recent(&self.transactions, limit)
    }

    pub fn filter(&self, filter: &TransactionFilter) -> Vec<&Transaction> {
        TransactionService::filter(&self.transactions, filter)
    }

    pub fn expense_by_category(&self) -> Vec<CategoryTotal> {
        SummaryService::expense_by_category(&self.transactions)
    }

    pub fn monthly_totals(&self) -> Vec<MonthlyTotal> {
        SummaryService::monthly_totals(&self.transactions)
    }

    pub fn export_csv(&self) -> Result<String, CoreError> {
        export::export_csv(&self.transactions)
    }

    /// Assigns a fresh id and puts the transaction at the front of the list.
    pub fn add_transaction(&mut self, fields: NewTransaction) -> Result<TransactionId, CoreError> {
        let txn = Transaction::from_new(fields);
        let id = txn.id.clone();
        tracing::debug!(id = %id, kind = %txn.kind, amount = txn.amount, "adding transaction");
        self.transactions.insert(0, txn);
        self.persist(Slice::Transactions)?;
        Ok(id)
    }

    /// Returns whether a transaction was removed. Unknown ids are a no-op, but
    /// the list is persisted either way.
    pub fn delete_transaction(&mut self, id: &TransactionId) -> Result<bool, CoreError> {
        let before = self.transactions.len();
        self.transactions.retain(|txn| &txn.id != id);
        let removed = self.transactions.len() != before;
        tracing::debug!(id = %id, removed, "deleting transaction");
        self.persist(Slice::Transactions)?;
        Ok(removed)
    }

    /// Merges `update` into the signed-in user. Returns `false` without
    /// touching storage when nobody is signed in.
    pub fn update_user(&mut self, update: UserUpdate) -> Result<bool, CoreError> {
        let Some(user) = self.user.as_mut() else {
            tracing::debug!("ignoring profile update while logged out");
            return Ok(false);
        };
        user.apply(update);
        self.persist(Slice::User)?;
        Ok(true)
    }

    /// Replaces the current user with one derived from `email`.
    pub fn login(&mut self, email: &str) -> Result<(), CoreError> {
        let user = User::from_email(email);
        tracing::debug!(name = %user.name, "logging in");
        self.user = Some(user);
        self.persist(Slice::User)
    }

    /// Clears the user and deletes its record.
    pub fn logout(&mut self) -> Result<(), CoreError> {
        tracing::debug!("logging out");
        self.user = None;
        self.persist(Slice::User)
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<(), CoreError> {
        tracing::debug!(theme = %theme, "setting theme");
        self.theme = theme;
        self.persist(Slice::Theme)
    }

    /// Slices whose stored record was rejected at open and has not been
    /// backed up yet.
    pub fn has_unreadable(&self, slice: Slice) -> bool {
        self.unreadable.contains_key(&slice)
    }

    pub fn has_pending_writes(&self) -> bool {
        self.pending.any()
    }

    /// Retries every slice whose last write failed. All slices are attempted;
    /// the first error is returned.
    pub fn flush(&mut self) -> Result<(), CoreError> {
        let mut first_error = None;
        for slice in Slice::ALL {
            if !self.pending.is_set(slice) {
                continue;
            }
            if let Err(err) = self.persist(slice) {
                first_error.get_or_insert(err);
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Flushes and consumes the store, reporting what could not be written.
    pub fn close(mut self) -> Result<(), CoreError> {
        let result = self.flush();
        self.pending = PendingWrites::default();
        result
    }

    fn persist(&mut self, slice: Slice) -> Result<(), CoreError> {
        let result = self
            .back_up_unreadable(slice)
            .and_then(|()| self.write_slice(slice));
        *self.pending.flag(slice) = result.is_err();
        match &result {
            Ok(()) => tracing::debug!(key = slice.key(), "persisted slice"),
            Err(err) => tracing::warn!(key = slice.key(), error = %err, "failed to persist slice"),
        }
        result
    }

    /// The rejected record is never overwritten before a copy of it exists
    /// under [`Slice::backup_key`].
    fn back_up_unreadable(&mut self, slice: Slice) -> Result<(), CoreError> {
        let Some(raw) = self.unreadable.get(&slice) else {
            return Ok(());
        };
        let raw = match raw {
            Some(raw) => Some(raw.clone()),
            None => self.storage.get(slice.key())?,
        };
        if let Some(raw) = raw {
            self.storage.set(slice.backup_key(), &raw)?;
            tracing::warn!(
                key = slice.key(),
                backup = slice.backup_key(),
                "copied unreadable record aside before overwriting it"
            );
        }
        self.unreadable.remove(&slice);
        Ok(())
    }

    fn write_slice(&self, slice: Slice) -> Result<(), CoreError> {
        match slice {
            Slice::Transactions => {
                let raw = snapshot::encode(TRANSACTIONS_SCHEMA_VERSION, &self.transactions)?;
                self.storage.set(TRANSACTIONS_KEY, &raw)
            }
            Slice::User => match &self.user {
                Some(user) => {
                    let raw = snapshot::encode(USER_SCHEMA_VERSION, user)?;
                    self.storage.set(USER_KEY, &raw)
                }
                None => self.storage.remove(USER_KEY),
            },
            Slice::Theme => {
                let raw = snapshot::encode(THEME_SCHEMA_VERSION, &self.theme)?;
                self.storage.set(THEME_KEY, &raw)
            }
        }
    }

    fn load_transactions(&mut self, options: StoreOptions) {
        let first_run = || {
            if options.seed_on_first_run {
                seed_transactions()
            } else {
                Vec::new()
            }
        };
        match self.storage.get(TRANSACTIONS_KEY) {
            Ok(Some(raw)) => {
                match snapshot::decode::<Vec<Transaction>>(
                    TRANSACTIONS_KEY,
                    &raw,
                    TRANSACTIONS_SCHEMA_VERSION,
                ) {
                    Ok(decoded) => {
                        self.transactions = decoded.value;
                        self.check_duplicate_ids();
                        if decoded.legacy {
                            self.migrate(Slice::Transactions);
                        }
                    }
                    Err(err) => {
                        self.reject(Slice::Transactions, Some(raw), err);
                        self.transactions = first_run();
                    }
                }
            }
            Ok(None) => {
                tracing::info!(
                    seeded = options.seed_on_first_run,
                    "no transactions record found, starting first run"
                );
                self.report.first_run = true;
                self.transactions = first_run();
                let _ = self.persist(Slice::Transactions);
            }
            Err(err) => {
                self.reject(Slice::Transactions, None, err);
                self.transactions = first_run();
            }
        }
    }

    fn load_user(&mut self) {
        match self.storage.get(USER_KEY) {
            Ok(Some(raw)) => match snapshot::decode::<User>(USER_KEY, &raw, USER_SCHEMA_VERSION) {
                Ok(decoded) => {
                    self.user = Some(decoded.value);
                    if decoded.legacy {
                        self.migrate(Slice::User);
                    }
                }
                Err(err) => self.reject(Slice::User, Some(raw), err),
            },
            Ok(None) => {}
            Err(err) => self.reject(Slice::User, None, err),
        }
    }

    fn load_theme(&mut self) {
        match self.storage.get(THEME_KEY) {
            Ok(Some(raw)) => match snapshot::decode_theme(&raw) {
                Ok(decoded) => {
                    self.theme = decoded.value;
                    if decoded.legacy {
                        self.migrate(Slice::Theme);
                    }
                }
                Err(err) => self.reject(Slice::Theme, Some(raw), err),
            },
            Ok(None) => {}
            Err(err) => self.reject(Slice::Theme, None, err),
        }
    }

    fn check_duplicate_ids(&mut self) {
        let duplicates = {
            let mut seen = HashSet::new();
            self.transactions
                .iter()
                .filter(|txn| !seen.insert(txn.id.as_str()))
                .count()
        };
        if duplicates > 0 {
            self.warn(
                Slice::Transactions,
                format!("{duplicates} transaction(s) share an id with an earlier entry"),
            );
        }
    }

    fn migrate(&mut self, slice: Slice) {
        tracing::info!(key = slice.key(), "rewriting legacy record with schema version");
        self.report.migrated.push(slice);
        let _ = self.persist(slice);
    }

    fn reject(&mut self, slice: Slice, raw: Option<String>, err: CoreError) {
        self.unreadable.insert(slice, raw);
        self.warn(slice, err.to_string());
    }

    fn warn(&mut self, slice: Slice, message: String) {
        tracing::warn!(key = slice.key(), %message, "falling back to defaults for unreadable record");
        self.report.warnings.push(LoadWarning { slice, message });
    }
}

impl Drop for FinanceStore {
    fn drop(&mut self) {
        if !self.pending.any() {
            return;
        }
        if let Err(err) = self.flush() {
            tracing::warn!(error = %err, "finance store dropped with unsaved changes");
        }
    }
}

impl fmt::Debug for FinanceStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FinanceStore")
            .field("transactions", &self.transactions.len())
            .field("user", &self.user)
            .field("theme", &self.theme)
            .field("pending", &self.pending)
            .field("unreadable", &self.unreadable.keys().collect::<Vec<_>>())
            .finish()
    }
}
