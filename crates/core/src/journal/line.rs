//! Single-sided journal lines.

use bahi_shared::types::MinorUnits;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which side of the ledger a line posts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Debit side.
    Debit,
    /// Credit side.
    Credit,
}

/// A single-sided proposed posting line.
///
/// Invariant (enforced by validation, not construction): exactly one of
/// `debit`/`credit` is strictly positive. Lines are transient; they are
/// consumed by the pairing engine and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalLine {
    /// Ledger account name.
    pub account: String,
    /// Posting date.
    pub date: NaiveDate,
    /// Debit amount in minor units (zero when crediting).
    pub debit: MinorUnits,
    /// Credit amount in minor units (zero when debiting).
    pub credit: MinorUnits,
    /// Free-text narration.
    pub narration: Option<String>,
}

impl JournalLine {
    /// Creates a debit line.
    #[must_use]
    pub fn debit(account: impl Into<String>, date: NaiveDate, amount: MinorUnits) -> Self {
        Self {
            account: account.into(),
            date,
            debit: amount,
            credit: MinorUnits::ZERO,
            narration: None,
        }
    }

    /// Creates a credit line.
    #[must_use]
    pub fn credit(account: impl Into<String>, date: NaiveDate, amount: MinorUnits) -> Self {
        Self {
            account: account.into(),
            date,
            debit: MinorUnits::ZERO,
            credit: amount,
            narration: None,
        }
    }

    /// Attaches a narration.
    #[must_use]
    pub fn with_narration(mut self, narration: impl Into<String>) -> Self {
        self.narration = Some(narration.into());
        self
    }

    /// The side this line posts to, when its shape is valid.
    #[must_use]
    pub fn side(&self) -> Option<Side> {
        match (self.debit.is_positive(), self.credit.is_positive()) {
            (true, false) => Some(Side::Debit),
            (false, true) => Some(Side::Credit),
            _ => None,
        }
    }

    /// The posted amount regardless of side.
    #[must_use]
    pub fn amount(&self) -> MinorUnits {
        if self.debit.is_positive() {
            self.debit
        } else {
            self.credit
        }
    }

    /// True when exactly one side is strictly positive and the other zero.
    #[must_use]
    pub fn has_valid_shape(&self) -> bool {
        (self.debit.is_positive() && self.credit.is_zero())
            || (self.credit.is_positive() && self.debit.is_zero())
    }

    /// True when both sides are zero. Zero lines are skipped, not rejected.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.debit.is_zero() && self.credit.is_zero()
    }
}

/// Sums debits and credits over a set of lines.
#[must_use]
pub fn totals(lines: &[JournalLine]) -> (MinorUnits, MinorUnits) {
    let debits = lines.iter().map(|l| l.debit).sum();
    let credits = lines.iter().map(|l| l.credit).sum();
    (debits, credits)
}
