//! Ledger existence and active-flag checks.

use std::collections::BTreeSet;

use crate::validation::context::TransactionContext;
use crate::validation::engine::Rule;
use crate::validation::findings::{codes, Finding};

/// Every referenced ledger must exist and be active.
///
/// At preview time unknown ledgers are normally auto-provisioned before
/// validation runs, so a miss here means provisioning was skipped or the
/// account has been deactivated.
pub struct LedgerActive;

impl Rule for LedgerActive {
    fn name(&self) -> &'static str {
        "ledger_active"
    }

    fn check(&self, ctx: &TransactionContext) -> Vec<Finding> {
        let referenced: BTreeSet<&str> = ctx
            .effective_lines()
            .map(|(_, line)| line.account.as_str())
            .collect();

        referenced
            .into_iter()
            .filter_map(|name| match ctx.account(name) {
                None => Some(
                    Finding::error(codes::LEDGER_MISSING, format!("Unknown ledger '{name}'"))
                        .with_meta("account", name)
                        .with_meta("reason", "missing"),
                ),
                Some(account) if !account.active => Some(
                    Finding::error(codes::LEDGER_MISSING, format!("Ledger '{name}' is inactive"))
                        .with_meta("account", name)
                        .with_meta("reason", "inactive"),
                ),
                Some(_) => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentType;
    use crate::journal::JournalLine;
    use crate::validation::testutil;
    use bahi_shared::types::MinorUnits;

    #[test]
    fn test_known_active_ledgers_pass() {
        let ctx = testutil::context(
            DocumentType::Journal,
            vec![
                JournalLine::debit("Rent", testutil::date(), MinorUnits::new(100)),
                JournalLine::credit("Bank", testutil::date(), MinorUnits::new(100)),
            ],
        );
        assert!(LedgerActive.check(&ctx).is_empty());
    }

    #[test]
    fn test_unknown_ledger_flagged_once() {
        let mut ctx = testutil::context(
            DocumentType::Journal,
            vec![
                JournalLine::debit("Mystery", testutil::date(), MinorUnits::new(60)),
                JournalLine::debit("Mystery", testutil::date(), MinorUnits::new(40)),
                JournalLine::credit("Bank", testutil::date(), MinorUnits::new(100)),
            ],
        );
        ctx.refdata.accounts.remove("Mystery");
        let findings = LedgerActive.check(&ctx);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].metadata["reason"], "missing");
    }

    #[test]
    fn test_inactive_ledger_flagged() {
        let mut ctx = testutil::context(
            DocumentType::Journal,
            vec![
                JournalLine::debit("Rent", testutil::date(), MinorUnits::new(100)),
                JournalLine::credit("Bank", testutil::date(), MinorUnits::new(100)),
            ],
        );
        ctx.refdata
            .accounts
            .get_mut("Rent")
            .map(|a| a.active = false);
        let findings = LedgerActive.check(&ctx);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].metadata["reason"], "inactive");
    }
}
