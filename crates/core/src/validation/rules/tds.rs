//! TDS (tax deducted at source) consistency.

use crate::accounts::AccountClass;
use bahi_shared::types::MinorUnits;

use crate::validation::context::TransactionContext;
use crate::validation::engine::Rule;
use crate::validation::findings::{codes, Finding};

/// Declared TDS must name a statutory section and reconcile with the
/// amount actually credited to TDS ledgers.
///
/// Silent when the model declares no TDS or a zero deduction.
pub struct TdsConsistency;

impl Rule for TdsConsistency {
    fn name(&self) -> &'static str {
        "tds_consistency"
    }

    fn check(&self, ctx: &TransactionContext) -> Vec<Finding> {
        let Some(tds) = &ctx.model.tds else {
            return Vec::new();
        };
        if tds.amount.is_zero() {
            return Vec::new();
        }
        let mut findings = Vec::new();

        if tds.section.as_deref().is_none_or(str::is_empty) {
            findings.push(
                Finding::error(
                    codes::TDS_SECTION_MISSING,
                    "TDS deducted without a statutory section",
                )
                .with_meta("amount", tds.amount.into_inner()),
            );
        }

        let posted: MinorUnits = ctx
            .effective_lines()
            .filter(|(_, line)| {
                ctx.account(&line.account)
                    .is_some_and(|a| a.class == AccountClass::Tds)
            })
            .map(|(_, line)| line.credit)
            .sum();

        if posted.is_zero() {
            findings.push(
                Finding::error(
                    codes::TDS_LEDGER_MISSING,
                    "TDS declared but no TDS ledger credit present",
                )
                .with_meta("declared", tds.amount.into_inner()),
            );
        } else if posted != tds.amount {
            findings.push(
                Finding::error(
                    codes::TDS_MISMATCH,
                    format!(
                        "Declared TDS {} differs from amount posted to TDS ledgers {posted}",
                        tds.amount
                    ),
                )
                .with_meta("declared", tds.amount.into_inner())
                .with_meta("posted", posted.into_inner()),
            );
        }

        findings
    }
}
