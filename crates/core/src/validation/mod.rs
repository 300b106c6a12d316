//! Ordered, non-short-circuiting validation rule packs.
//!
//! Each document type maps to an explicit ordered list of rules. Every rule
//! receives the full context and returns its findings; results are
//! concatenated so a caller always sees every problem in one pass. New
//! rules are added by appending to the pack, not by modifying existing
//! rules.

pub mod context;
pub mod engine;
pub mod findings;
pub mod policy;
pub mod rules;

pub use context::{AccountRef, RefData, TransactionContext};
pub use engine::{rules_for, validate, Rule};
pub use findings::{codes, Finding, Severity, ValidationResult};
pub use policy::ValidationPolicy;

#[cfg(test)]
pub(crate) mod testutil {
    use bahi_shared::types::{AccountId, TenantId};
    use chrono::NaiveDate;

    use crate::accounts::{infer_class, infer_kind};
    use crate::document::{DocumentModel, DocumentType};
    use crate::journal::JournalLine;

    use super::context::{AccountRef, RefData, TransactionContext};
    use super::policy::ValidationPolicy;

    pub fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
    }

    /// Builds a context with every referenced account registered as active,
    /// with kind and class inferred from the name.
    pub fn context(doc_type: DocumentType, lines: Vec<JournalLine>) -> TransactionContext {
        let mut refdata = RefData {
            today: Some(date()),
            ..RefData::default()
        };
        for line in &lines {
            refdata
                .accounts
                .entry(line.account.clone())
                .or_insert_with(|| AccountRef {
                    id: AccountId::new(),
                    kind: infer_kind(&line.account),
                    class: infer_class(&line.account),
                    active: true,
                });
        }

        let model_date = lines.first().map_or_else(date, |l| l.date);
        TransactionContext {
            tenant: TenantId::new(),
            doc_type,
            lines,
            model: DocumentModel::bare(model_date),
            idempotency_key: Some("test-key".to_string()),
            refdata,
            policy: ValidationPolicy::new(),
        }
    }
}
