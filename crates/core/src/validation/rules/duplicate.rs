//! External-reference duplicate detection.

use crate::validation::context::TransactionContext;
use crate::validation::engine::Rule;
use crate::validation::findings::{codes, Finding};

/// Warns when a document with the same external reference already exists
/// for the tenant. The existence check runs in the orchestrator's prefetch;
/// this rule only reports the result.
///
/// A warning rather than an error: re-supplying a bill number can be
/// legitimate (part payments against one bill), so the caller decides.
pub struct DuplicateDoc;

impl Rule for DuplicateDoc {
    fn name(&self) -> &'static str {
        "duplicate_doc"
    }

    fn check(&self, ctx: &TransactionContext) -> Vec<Finding> {
        if !ctx.refdata.duplicate_reference {
            return Vec::new();
        }
        let reference = ctx.model.reference.clone().unwrap_or_default();
        vec![Finding::warning(
            codes::DUPLICATE_DOC,
            format!("A document with reference '{reference}' already exists"),
        )
        .with_meta("reference", reference)]
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
    fn test_duplicate_reference_warns() {
        let mut ctx = testutil::context(
            DocumentType::Invoice,
            vec![
                JournalLine::debit("Debtors", testutil::date(), MinorUnits::new(100)),
                JournalLine::credit("Sales", testutil::date(), MinorUnits::new(100)),
            ],
        );
        ctx.model.reference = Some("INV/889".to_string());
        ctx.refdata.duplicate_reference = true;
        let findings = DuplicateDoc.check(&ctx);
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].severity,
            crate::validation::findings::Severity::Warning
        );
    }

    #[test]
    fn test_fresh_reference_silent() {
        let ctx = testutil::context(
            DocumentType::Invoice,
            vec![
                JournalLine::debit("Debtors", testutil::date(), MinorUnits::new(100)),
                JournalLine::credit("Sales", testutil::date(), MinorUnits::new(100)),
            ],
        );
        assert!(DuplicateDoc.check(&ctx).is_empty());
    }
}
