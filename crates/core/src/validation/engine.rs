//! The rule engine: one shared rule capability, explicit ordered packs.

use crate::document::DocumentType;

use super::context::TransactionContext;
use super::findings::{Finding, ValidationResult};
use super::rules::{
    balance::Balanced,
    dates::{DateValid, PeriodLock},
    duplicate::DuplicateDoc,
    funds::FundsGuard,
    gst::GstBreakup,
    idempotency::IdempotencyPresence,
    instrument::InstrumentHygiene,
    inventory::InvoiceItems,
    ledger::LedgerActive,
    shape::{DrCrExclusive, MinLineShape},
    tds::TdsConsistency,
    totals::TotalsDeclared,
};

/// A single validation rule.
///
/// Rules are pure and local: they read the context, return findings, and
/// never abort the pass. A rule missing its reference data returns no
/// findings rather than an error.
pub trait Rule: Send + Sync {
    /// Rule name for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Runs the rule against the full context.
    fn check(&self, ctx: &TransactionContext) -> Vec<Finding>;
}

/// The ordered rule pack for a document type.
///
/// Structural rules run first so referential findings are reported against
/// well-shaped input, but every rule always runs regardless of earlier
/// findings.
#[must_use]
pub fn rules_for(doc_type: DocumentType) -> Vec<Box<dyn Rule>> {
    let mut pack: Vec<Box<dyn Rule>> = vec![
        Box::new(MinLineShape),
        Box::new(DrCrExclusive),
        Box::new(Balanced),
        Box::new(LedgerActive),
        Box::new(DateValid),
        Box::new(PeriodLock),
    ];

    match doc_type {
        DocumentType::Invoice => {
            pack.push(Box::new(FundsGuard));
            pack.push(Box::new(TotalsDeclared));
            pack.push(Box::new(GstBreakup));
            pack.push(Box::new(TdsConsistency));
            pack.push(Box::new(InvoiceItems));
        }
        DocumentType::Receipt => {
            pack.push(Box::new(InstrumentHygiene::single()));
            pack.push(Box::new(FundsGuard));
            pack.push(Box::new(TotalsDeclared));
        }
        DocumentType::PaymentVoucher => {
            pack.push(Box::new(InstrumentHygiene::single()));
            pack.push(Box::new(FundsGuard));
            pack.push(Box::new(TotalsDeclared));
            pack.push(Box::new(TdsConsistency));
        }
        DocumentType::ContraVoucher => {
            pack.push(Box::new(InstrumentHygiene::contra()));
            pack.push(Box::new(FundsGuard));
        }
        DocumentType::Journal => {
            pack.push(Box::new(FundsGuard));
        }
    }

    pack.push(Box::new(DuplicateDoc));
    pack.push(Box::new(IdempotencyPresence));
    pack
}

/// Runs the full pack for the context's document type.
///
/// Findings pass through the context's severity policy before bucketing;
/// nothing short-circuits.
#[must_use]
pub fn validate(ctx: &TransactionContext) -> ValidationResult {
    let mut result = ValidationResult::new();
    for rule in rules_for(ctx.doc_type) {
        for finding in rule.check(ctx) {
            result.push(ctx.policy.apply(finding));
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::findings::{codes, Severity};
    use crate::validation::testutil;
    use crate::validation::ValidationPolicy;
    use bahi_shared::types::MinorUnits;
    use crate::journal::JournalLine;

    #[test]
    fn test_clean_payment_voucher_passes() {
        let ctx = testutil::context(
            DocumentType::PaymentVoucher,
            vec![
                JournalLine::debit("Office Expenses", testutil::date(), MinorUnits::new(500)),
                JournalLine::credit("Bank", testutil::date(), MinorUnits::new(500)),
            ],
        );
        let result = validate(&ctx);
        assert!(result.is_passing(), "{result:?}");
    }

    #[test]
    fn test_all_findings_reported_in_one_pass() {
        // One line, unbalanced, both sides set: three distinct findings.
        let ctx = testutil::context(
            DocumentType::Journal,
            vec![JournalLine {
                account: "Rent".into(),
                date: testutil::date(),
                debit: MinorUnits::new(100),
                credit: MinorUnits::new(40),
                narration: None,
            }],
        );
        let result = validate(&ctx);
        assert!(result.find(codes::SHAPE_MIN_LINES).is_some());
        assert!(result.find(codes::DRCR_EXCLUSIVE).is_some());
        assert!(result.find(codes::NOT_BALANCED).is_some());
    }

    #[test]
    fn test_policy_downgrade_applies() {
        let mut ctx = testutil::context(
            DocumentType::Journal,
            vec![
                JournalLine::debit("Rent", testutil::date(), MinorUnits::new(100)),
                JournalLine::credit("Bank", testutil::date(), MinorUnits::new(40)),
            ],
        );
        ctx.policy =
            ValidationPolicy::new().with_override(codes::NOT_BALANCED, Severity::Warning);
        let result = validate(&ctx);
        assert!(result.is_passing());
        assert!(result
            .warnings
            .iter()
            .any(|f| f.code == codes::NOT_BALANCED));
    }

    #[test]
    fn test_every_doc_type_has_a_pack() {
        for doc_type in DocumentType::all() {
            assert!(!rules_for(doc_type).is_empty());
        }
    }
}
