//! Validation context: everything a rule may consult.
//!
//! Rules are pure. All reference data (account registry, headroom,
//! duplicate flags, period locks) is prefetched by the orchestrator before
//! the pass; a rule whose data is absent emits no finding rather than
//! failing the pass.

use std::collections::BTreeMap;

use bahi_shared::types::{AccountId, MinorUnits, TenantId};
use chrono::NaiveDate;

use crate::accounts::{AccountClass, AccountKind};
use crate::document::{DocumentModel, DocumentType};
use crate::journal::JournalLine;

use super::policy::ValidationPolicy;

/// A resolved chart-of-accounts entry as rules see it.
#[derive(Debug, Clone)]
pub struct AccountRef {
    /// Account ID.
    pub id: AccountId,
    /// Fundamental kind.
    pub kind: AccountKind,
    /// Functional class.
    pub class: AccountClass,
    /// Active flag; inactive accounts cannot be posted to.
    pub active: bool,
}

/// Prefetched reference data for one validation pass.
#[derive(Debug, Clone, Default)]
pub struct RefData {
    /// Resolved accounts by name. Names absent here are unknown ledgers.
    pub accounts: BTreeMap<String, AccountRef>,
    /// Available headroom per monitored (account, date) with an outflow.
    pub headroom: BTreeMap<(String, NaiveDate), MinorUnits>,
    /// True when a document with the same reference already exists.
    pub duplicate_reference: bool,
    /// Books are locked through this date, when set.
    pub locked_through: Option<NaiveDate>,
    /// Available stock per item name, where tracked.
    pub stock_levels: BTreeMap<String, i64>,
    /// Today, for future-dating checks. `None` disables the check.
    pub today: Option<NaiveDate>,
}

/// Full context handed to every rule in a pack.
#[derive(Debug, Clone)]
pub struct TransactionContext {
    /// Owning tenant.
    pub tenant: TenantId,
    /// Document type, selecting the rule pack.
    pub doc_type: DocumentType,
    /// Proposed single-sided lines.
    pub lines: Vec<JournalLine>,
    /// Derived document model.
    pub model: DocumentModel,
    /// Client-supplied idempotency key, if any.
    pub idempotency_key: Option<String>,
    /// Prefetched reference data.
    pub refdata: RefData,
    /// Severity override policy.
    pub policy: ValidationPolicy,
}

impl TransactionContext {
    /// Looks up a referenced account by name.
    #[must_use]
    pub fn account(&self, name: &str) -> Option<&AccountRef> {
        self.refdata.accounts.get(name)
    }

    /// True when the named account is a monitored cash/bank instrument.
    #[must_use]
    pub fn is_instrument(&self, name: &str) -> bool {
        self.account(name).is_some_and(|a| a.class.is_instrument())
    }

    /// Lines with a non-zero amount; zero lines are skipped everywhere.
    pub fn effective_lines(&self) -> impl Iterator<Item = (usize, &JournalLine)> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, line)| !line.is_zero())
    }
}
