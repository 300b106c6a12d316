//! Funds-and-facility headroom calculations.
//!
//! The pure half of the funds guard: given a running balance, an optional
//! credit facility, and the total of active holds, compute how much can
//! still flow out of an account on a date. The database half (balance
//! queries, hold rows) lives in `bahi-db`.

use std::collections::BTreeMap;

use bahi_shared::types::MinorUnits;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::journal::JournalLine;

/// Kind of credit facility configured on an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FacilityKind {
    /// Overdraft: extends the balance by the sanctioned limit.
    Od,
    /// Open cash credit: same headroom treatment as overdraft.
    Occ,
    /// Term loan: evaluated against outstanding principal, not balance.
    Loan,
}

/// A credit facility active on a posting date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facility {
    /// Facility kind.
    pub kind: FacilityKind,
    /// Sanctioned limit.
    pub limit: MinorUnits,
    /// Outstanding principal (meaningful for LOAN facilities).
    pub outstanding: MinorUnits,
}

/// Computes available headroom for an account on a date.
///
/// - LOAN: `max(0, limit - outstanding) - holds` (the balance is the loan
///   ledger itself and does not represent drawable cash).
/// - OD/OCC: `balance + limit - holds`.
/// - No facility: `balance - holds`.
///
/// `balance` is the running balance as of the date (debits minus credits,
/// inclusive) and may be negative. The result may also be negative; the
/// guard reports a shortfall whenever outflow exceeds it.
#[must_use]
pub fn available_headroom(
    balance: MinorUnits,
    facility: Option<Facility>,
    holds: MinorUnits,
) -> MinorUnits {
    match facility {
        Some(f) if matches!(f.kind, FacilityKind::Loan) => {
            f.limit.saturating_sub_floor_zero(f.outstanding) - holds
        }
        Some(f) => balance + f.limit - holds,
        None => balance - holds,
    }
}

/// Net outflow per (account, date) across a proposed line set.
///
/// An outflow is a net credit against a monitored (cash/bank) account.
/// Accounts the predicate rejects are skipped; only strictly positive nets
/// are returned.
pub fn net_outflows<F>(
    lines: &[JournalLine],
    mut is_monitored: F,
) -> BTreeMap<(String, NaiveDate), MinorUnits>
where
    F: FnMut(&str) -> bool,
{
    let mut nets: BTreeMap<(String, NaiveDate), i64> = BTreeMap::new();
    for line in lines {
        if !is_monitored(&line.account) {
            continue;
        }
        *nets.entry((line.account.clone(), line.date)).or_default() +=
            line.credit.into_inner() - line.debit.into_inner();
    }

    nets.into_iter()
        .filter(|(_, net)| *net > 0)
        .map(|(key, net)| (key, MinorUnits::new(net)))
        .collect()
}
