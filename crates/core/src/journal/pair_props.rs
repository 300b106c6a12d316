//! Property tests for the pairing engine.

use bahi_shared::types::MinorUnits;
use chrono::NaiveDate;
use proptest::prelude::*;

use super::line::JournalLine;
use super::pair::pair_lines;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
}

/// Strategy: a handful of account names so same-account collisions occur.
fn account_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Bank".to_string()),
        Just("Cash".to_string()),
        Just("Rent".to_string()),
        Just("Sales".to_string()),
        Just("Sundry Debtors".to_string()),
    ]
}

/// Strategy: a balanced line set. Debit lines are generated, then credit
/// lines are synthesized to consume exactly the same total.
fn balanced_lines_strategy() -> impl Strategy<Value = Vec<JournalLine>> {
    (
        prop::collection::vec((account_strategy(), 1i64..50_000), 1..6),
        prop::collection::vec(account_strategy(), 1..6),
    )
        .prop_map(|(debit_specs, credit_accounts)| {
            let mut lines: Vec<JournalLine> = debit_specs
                .iter()
                .map(|(account, minor)| {
                    JournalLine::debit(account.clone(), date(), MinorUnits::new(*minor))
                })
                .collect();

            let total: i64 = debit_specs.iter().map(|(_, minor)| *minor).sum();
            let n = credit_accounts.len() as i64;
            let share = total / n;
            let mut assigned = 0;
            for (i, account) in credit_accounts.iter().enumerate() {
                let minor = if i as i64 == n - 1 {
                    total - assigned
                } else {
                    share
                };
                assigned += minor;
                if minor > 0 {
                    lines.push(JournalLine::credit(
                        account.clone(),
                        date(),
                        MinorUnits::new(minor),
                    ));
                }
            }
            lines
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// For all balanced line sets, the emitted pairs' total debit equals
    /// total credit, exactly, in minor units.
    #[test]
    fn prop_pairs_balance_exactly(lines in balanced_lines_strategy()) {
        let input_debits: i64 = lines.iter().map(|l| l.debit.into_inner()).sum();
        let pairs = pair_lines(&lines);
        let emitted: i64 = pairs.iter().map(|p| p.amount.into_inner()).sum();
        prop_assert_eq!(emitted, input_debits);
    }

    /// Every emitted pair carries a strictly positive amount.
    #[test]
    fn prop_pair_amounts_positive(lines in balanced_lines_strategy()) {
        for pair in pair_lines(&lines) {
            prop_assert!(pair.amount.is_positive());
        }
    }

    /// Emission count is bounded by the input line count (O(n) guarantee).
    #[test]
    fn prop_emission_bounded_by_line_count(lines in balanced_lines_strategy()) {
        let pairs = pair_lines(&lines);
        prop_assert!(pairs.len() <= lines.len());
    }

    /// A same-account pair is emitted only when no alternative non-exhausted
    /// account existed in either bucket; with at least two distinct accounts
    /// overall and a two-line input, no self pair appears.
    #[test]
    fn prop_distinct_two_line_never_self_pairs(
        amount in 1i64..1_000_000,
    ) {
        let lines = vec![
            JournalLine::debit("Rent", date(), MinorUnits::new(amount)),
            JournalLine::credit("Bank", date(), MinorUnits::new(amount)),
        ];
        let pairs = pair_lines(&lines);
        prop_assert_eq!(pairs.len(), 1);
        prop_assert!(!pairs[0].is_self_pair());
    }

    /// Per-account net positions are preserved: for every account, the
    /// debits minus credits across emitted pairs equal the same net across
    /// input lines.
    #[test]
    fn prop_account_nets_preserved(lines in balanced_lines_strategy()) {
        use std::collections::BTreeMap;

        let mut input_net: BTreeMap<String, i64> = BTreeMap::new();
        for line in &lines {
            *input_net.entry(line.account.clone()).or_default() +=
                line.debit.into_inner() - line.credit.into_inner();
        }

        let mut pair_net: BTreeMap<String, i64> = BTreeMap::new();
        for pair in pair_lines(&lines) {
            *pair_net.entry(pair.debit_account.clone()).or_default() += pair.amount.into_inner();
            *pair_net.entry(pair.credit_account.clone()).or_default() -= pair.amount.into_inner();
        }

        for (account, net) in input_net {
            prop_assert_eq!(pair_net.get(&account).copied().unwrap_or(0), net);
        }
    }
}
