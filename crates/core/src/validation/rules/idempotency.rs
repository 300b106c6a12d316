//! Idempotency-key presence.

use crate::validation::context::TransactionContext;
use crate::validation::engine::Rule;
use crate::validation::findings::{codes, Finding};

/// Notes (informationally) when the caller supplied no idempotency key.
/// Postings without a key cannot be safely retried after a network failure.
pub struct IdempotencyPresence;

impl Rule for IdempotencyPresence {
    fn name(&self) -> &'static str {
        "idempotency_presence"
    }

    fn check(&self, ctx: &TransactionContext) -> Vec<Finding> {
        if ctx.idempotency_key.as_deref().is_none_or(str::is_empty) {
            vec![Finding::info(
                codes::IDEMPOTENCY_MISSING,
                "No idempotency key supplied; retries may double-post",
            )]
        } else {
            Vec::new()
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
    fn test_missing_key_is_info_only() {
        let mut ctx = testutil::context(
            DocumentType::Journal,
            vec![
                JournalLine::debit("Rent", testutil::date(), MinorUnits::new(100)),
                JournalLine::credit("Bank", testutil::date(), MinorUnits::new(100)),
            ],
        );
        ctx.idempotency_key = None;
        let findings = IdempotencyPresence.check(&ctx);
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].severity,
            crate::validation::findings::Severity::Info
        );
    }

    #[test]
    fn test_empty_key_treated_as_missing() {
        let mut ctx = testutil::context(
            DocumentType::Journal,
            vec![
                JournalLine::debit("Rent", testutil::date(), MinorUnits::new(100)),
                JournalLine::credit("Bank", testutil::date(), MinorUnits::new(100)),
            ],
        );
        ctx.idempotency_key = Some(String::new());
        assert_eq!(IdempotencyPresence.check(&ctx).len(), 1);
    }

    #[test]
    fn test_present_key_silent() {
        let ctx = testutil::context(
            DocumentType::Journal,
            vec![
                JournalLine::debit("Rent", testutil::date(), MinorUnits::new(100)),
                JournalLine::credit("Bank", testutil::date(), MinorUnits::new(100)),
            ],
        );
        assert!(IdempotencyPresence.check(&ctx).is_empty());
    }
}
