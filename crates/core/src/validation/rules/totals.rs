//! Declared-vs-computed totals.

use crate::journal::line::totals;
use crate::validation::context::TransactionContext;
use crate::validation::engine::Rule;
use crate::validation::findings::{codes, Finding};

/// The declared grand total must match the computed debit total.
///
/// Silent when the model declares no grand total.
pub struct TotalsDeclared;

impl Rule for TotalsDeclared {
    fn name(&self) -> &'static str {
        "totals_declared"
    }

    fn check(&self, ctx: &TransactionContext) -> Vec<Finding> {
        let Some(declared) = ctx.model.grand_total else {
            return Vec::new();
        };
        let (computed, _) = totals(&ctx.lines);
        if declared == computed {
            Vec::new()
        } else {
            vec![Finding::error(
                codes::TOTALS_MISMATCH,
                format!("Declared grand total {declared} differs from computed {computed}"),
            )
            .with_meta("declared", declared.into_inner())
            .with_meta("computed", computed.into_inner())]
        }
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
    fn test_matching_totals_pass() {
        let mut ctx = testutil::context(
            DocumentType::PaymentVoucher,
            vec![
                JournalLine::debit("Office Expenses", testutil::date(), MinorUnits::new(500)),
                JournalLine::credit("Bank", testutil::date(), MinorUnits::new(500)),
            ],
        );
        ctx.model.grand_total = Some(MinorUnits::new(500));
        assert!(TotalsDeclared.check(&ctx).is_empty());
    }

    #[test]
    fn test_mismatch_flagged_with_both_sides() {
        let mut ctx = testutil::context(
            DocumentType::PaymentVoucher,
            vec![
                JournalLine::debit("Office Expenses", testutil::date(), MinorUnits::new(500)),
                JournalLine::credit("Bank", testutil::date(), MinorUnits::new(500)),
            ],
        );
        ctx.model.grand_total = Some(MinorUnits::new(499));
        let findings = TotalsDeclared.check(&ctx);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].metadata["declared"], 499);
        assert_eq!(findings[0].metadata["computed"], 500);
    }

    #[test]
    fn test_undeclared_total_silent() {
        let ctx = testutil::context(
            DocumentType::PaymentVoucher,
            vec![
                JournalLine::debit("Office Expenses", testutil::date(), MinorUnits::new(500)),
                JournalLine::credit("Bank", testutil::date(), MinorUnits::new(500)),
            ],
        );
        assert!(TotalsDeclared.check(&ctx).is_empty());
    }
}
