//! The ledger pairing engine.
//!
//! Converts a balanced set of single-sided lines into minimal double-entry
//! pairs. The greedy two-cursor walk guarantees O(n) pair emissions and, by
//! construction, that the emitted pairs' total debit equals total credit:
//! each pair amount is subtracted from both sides equally.

use bahi_shared::types::MinorUnits;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::line::{totals, JournalLine};

/// A double-entry posting pair. This is the only shape ever persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerPair {
    /// Account debited.
    pub debit_account: String,
    /// Account credited.
    pub credit_account: String,
    /// Pair amount, always strictly positive.
    pub amount: MinorUnits,
    /// Posting date.
    pub date: NaiveDate,
    /// Narration carried over from the source lines.
    pub narration: Option<String>,
}

impl LedgerPair {
    /// True when the pair debits and credits the same account.
    #[must_use]
    pub fn is_self_pair(&self) -> bool {
        self.debit_account == self.credit_account
    }
}

/// One side's worth of a line while the cursor walk consumes it.
struct Leg {
    account: String,
    remaining: MinorUnits,
    date: NaiveDate,
    narration: Option<String>,
}

/// Pairs a balanced set of single-sided lines into double-entry pairs.
///
/// Zero-amount lines are skipped. If the input does not balance (total
/// debits != total credits) or is empty after skipping, the result is empty:
/// balance is checked upstream by validation, so an unbalanced input here is
/// treated as "nothing to post" rather than an error.
///
/// When the cursors land on the same account on both sides, the walk scans
/// ahead in the credit bucket, then the debit bucket, for a different
/// non-exhausted account to swap into position. If no alternative exists the
/// same-account pair is emitted anyway; the preview orchestrator rejects
/// such pairs before anything is staged.
#[must_use]
pub fn pair_lines(lines: &[JournalLine]) -> Vec<LedgerPair> {
    let live: Vec<&JournalLine> = lines.iter().filter(|l| !l.is_zero()).collect();
    if live.is_empty() {
        return Vec::new();
    }

    let (debit_total, credit_total) = totals(lines);
    if debit_total != credit_total {
        return Vec::new();
    }

    let mut debits: Vec<Leg> = Vec::new();
    let mut credits: Vec<Leg> = Vec::new();
    for line in live {
        let leg = Leg {
            account: line.account.clone(),
            remaining: line.amount(),
            date: line.date,
            narration: line.narration.clone(),
        };
        if line.debit.is_positive() {
            debits.push(leg);
        } else {
            credits.push(leg);
        }
    }

    let mut pairs = Vec::new();
    let mut di = 0;
    let mut ci = 0;

    while di < debits.len() && ci < credits.len() {
        if debits[di].account == credits[ci].account {
            swap_ahead(&mut debits, &mut credits, di, ci);
        }

        let amount = debits[di].remaining.min(credits[ci].remaining);
        if amount.is_positive() {
            pairs.push(LedgerPair {
                debit_account: debits[di].account.clone(),
                credit_account: credits[ci].account.clone(),
                amount,
                date: debits[di].date,
                narration: debits[di]
                    .narration
                    .clone()
                    .or_else(|| credits[ci].narration.clone()),
            });
        }

        debits[di].remaining = debits[di].remaining - amount;
        credits[ci].remaining = credits[ci].remaining - amount;

        if debits[di].remaining.is_zero() {
            di += 1;
        }
        if credits[ci].remaining.is_zero() {
            ci += 1;
        }
    }

    pairs
}

/// Looks past the current cursors for a leg on a different account and swaps
/// it into position. Credit bucket first, then debit bucket.
fn swap_ahead(debits: &mut [Leg], credits: &mut [Leg], di: usize, ci: usize) {
    let account = debits[di].account.clone();

    if let Some(j) = (ci + 1..credits.len())
        .find(|&j| credits[j].account != account && credits[j].remaining.is_positive())
    {
        credits.swap(ci, j);
        return;
    }

    if let Some(j) = (di + 1..debits.len())
        .find(|&j| debits[j].account != account && debits[j].remaining.is_positive())
    {
        debits.swap(di, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
    }

    fn dr(account: &str, minor: i64) -> JournalLine {
        JournalLine::debit(account, date(), MinorUnits::new(minor))
    }

    fn cr(account: &str, minor: i64) -> JournalLine {
        JournalLine::credit(account, date(), MinorUnits::new(minor))
    }

    #[test]
    fn test_two_line_input_yields_one_full_pair() {
        let pairs = pair_lines(&[dr("Office Expenses", 500), cr("Bank", 500)]);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].debit_account, "Office Expenses");
        assert_eq!(pairs[0].credit_account, "Bank");
        assert_eq!(pairs[0].amount, MinorUnits::new(500));
        assert_eq!(pairs[0].date, date());
    }

    #[test]
    fn test_split_debit_against_one_credit() {
        let pairs = pair_lines(&[dr("Rent", 30_000), dr("Electricity", 5_000), cr("Bank", 35_000)]);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].amount, MinorUnits::new(30_000));
        assert_eq!(pairs[1].amount, MinorUnits::new(5_000));
        assert!(pairs.iter().all(|p| p.credit_account == "Bank"));
    }

    #[test]
    fn test_unbalanced_input_yields_empty() {
        let pairs = pair_lines(&[dr("Rent", 100), cr("Bank", 50)]);
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_empty_input_yields_empty() {
        assert!(pair_lines(&[]).is_empty());
    }

    #[test]
    fn test_zero_lines_skipped() {
        let pairs = pair_lines(&[dr("Rent", 100), dr("Misc", 0), cr("Bank", 100)]);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].debit_account, "Rent");
    }

    #[test]
    fn test_totals_balance_by_construction() {
        let pairs = pair_lines(&[
            dr("Purchases", 90_000),
            dr("Input CGST", 8_100),
            dr("Input SGST", 8_100),
            cr("Sundry Creditors", 105_200),
            cr("TDS Payable", 1_000),
        ]);
        let emitted: MinorUnits = pairs.iter().map(|p| p.amount).sum();
        assert_eq!(emitted, MinorUnits::new(106_200));
        assert!(!pairs.is_empty());
    }

    #[test]
    fn test_swap_ahead_avoids_same_account_pair() {
        // "Bank" appears on both sides; the walk must pair Bank-dr against
        // Loan-cr and Rent-dr against Bank-cr, never Bank against Bank.
        let pairs = pair_lines(&[
            dr("Bank", 100),
            dr("Rent", 50),
            cr("Bank", 50),
            cr("Loan", 100),
        ]);
        assert!(pairs.iter().all(|p| !p.is_self_pair()), "{pairs:?}");
        let emitted: MinorUnits = pairs.iter().map(|p| p.amount).sum();
        assert_eq!(emitted, MinorUnits::new(150));
    }

    #[test]
    fn test_unavoidable_same_account_pair_is_emitted() {
        let pairs = pair_lines(&[dr("Bank", 100), cr("Bank", 100)]);
        assert_eq!(pairs.len(), 1);
        assert!(pairs[0].is_self_pair());
    }

    #[test]
    fn test_fully_offsetting_input() {
        // Balanced but every line zero: nothing to post.
        let pairs = pair_lines(&[dr("Bank", 0), cr("Bank", 0)]);
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_narration_prefers_debit_leg() {
        let lines = vec![
            dr("Rent", 100).with_narration("April rent"),
            cr("Bank", 100).with_narration("NEFT"),
        ];
        let pairs = pair_lines(&lines);
        assert_eq!(pairs[0].narration.as_deref(), Some("April rent"));
    }
}
