//! Validation findings and results.
//!
//! Rules report findings; findings never abort the pass. A caller always
//! sees every problem in one consolidated result.

use serde::{Deserialize, Serialize};

/// Stable validation code taxonomy.
pub mod codes {
    /// Transaction has fewer than two effective lines.
    pub const SHAPE_MIN_LINES: &str = "SHAPE_MIN_LINES";
    /// A line does not carry exactly one positive side.
    pub const DRCR_EXCLUSIVE: &str = "DRCR_EXCLUSIVE";
    /// Debit and credit totals differ.
    pub const NOT_BALANCED: &str = "NOT_BALANCED";
    /// Referenced ledger is unknown or inactive.
    pub const LEDGER_MISSING: &str = "LEDGER_MISSING";
    /// Posting date is invalid (future-dated or inconsistent).
    pub const DATE_INVALID: &str = "DATE_INVALID";
    /// Posting date falls inside a locked period.
    pub const PERIOD_LOCKED: &str = "PERIOD_LOCKED";
    /// Receipt/payment must move exactly one cash/bank instrument.
    pub const BANK_SINGLELINE: &str = "BANK_SINGLELINE";
    /// Cash and bank instruments mixed in one document.
    pub const BANK_MIXED: &str = "BANK_MIXED";
    /// Outflow exceeds available cash/facility headroom.
    pub const BANK_CASH_INSUFFICIENT: &str = "BANK_CASH_INSUFFICIENT";
    /// Declared grand total differs from computed line total.
    pub const TOTALS_MISMATCH: &str = "TOTALS_MISMATCH";
    /// Inter-state supply must carry IGST only.
    pub const GST_SPLIT_INTER: &str = "GST_SPLIT_INTER";
    /// Intra-state supply must split CGST/SGST equally with no IGST.
    pub const GST_SPLIT_INTRA: &str = "GST_SPLIT_INTRA";
    /// GST components do not reconcile with declared totals.
    pub const GST_TAX_MISMATCH: &str = "GST_TAX_MISMATCH";
    /// TDS deducted without a statutory section.
    pub const TDS_SECTION_MISSING: &str = "TDS_SECTION_MISSING";
    /// Declared TDS differs from the amount posted to TDS ledgers.
    pub const TDS_MISMATCH: &str = "TDS_MISMATCH";
    /// TDS declared but no TDS ledger line present.
    pub const TDS_LEDGER_MISSING: &str = "TDS_LEDGER_MISSING";
    /// A document with the same reference already exists.
    pub const DUPLICATE_DOC: &str = "DUPLICATE_DOC";
    /// No idempotency key supplied (informational).
    pub const IDEMPOTENCY_MISSING: &str = "IDEMPOTENCY_MISSING";
    /// Invoice carries no line items.
    pub const INV_ITEM_MISSING: &str = "INV_ITEM_MISSING";
    /// Invoice quantity would drive stock negative.
    pub const INV_NEG_STOCK: &str = "INV_NEG_STOCK";
    /// Pairing could not avoid debiting and crediting the same account.
    pub const SAME_ACCOUNT_PAIR: &str = "SAME_ACCOUNT_PAIR";
}

/// Finding severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks the preview.
    Error,
    /// Surfaced but not blocking.
    Warning,
    /// Informational note.
    Info,
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Stable code from the taxonomy.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Severity as produced by the rule (policy may override).
    pub severity: Severity,
    /// Path into the input this finding refers to (e.g. `lines[2]`).
    pub path: Option<String>,
    /// Structured remediation metadata.
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl Finding {
    /// Creates an error finding.
    #[must_use]
    pub fn error(code: &str, message: impl Into<String>) -> Self {
        Self::new(code, message, Severity::Error)
    }

    /// Creates a warning finding.
    #[must_use]
    pub fn warning(code: &str, message: impl Into<String>) -> Self {
        Self::new(code, message, Severity::Warning)
    }

    /// Creates an informational finding.
    #[must_use]
    pub fn info(code: &str, message: impl Into<String>) -> Self {
        Self::new(code, message, Severity::Info)
    }

    fn new(code: &str, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            severity,
            path: None,
            metadata: serde_json::Map::new(),
        }
    }

    /// Attaches an input path.
    #[must_use]
    pub fn at(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attaches a metadata field.
    #[must_use]
    pub fn with_meta(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }
}

/// Consolidated result of one validation pass. Transient, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Blocking findings.
    pub errors: Vec<Finding>,
    /// Non-blocking findings.
    pub warnings: Vec<Finding>,
    /// Informational notes.
    pub info: Vec<Finding>,
}

impl ValidationResult {
    /// An empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Buckets a finding by its severity.
    pub fn push(&mut self, finding: Finding) {
        match finding.severity {
            Severity::Error => self.errors.push(finding),
            Severity::Warning => self.warnings.push(finding),
            Severity::Info => self.info.push(finding),
        }
    }

    /// Appends all findings from another result.
    pub fn merge(&mut self, other: Self) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.info.extend(other.info);
    }

    /// True when no blocking findings exist.
    #[must_use]
    pub fn is_passing(&self) -> bool {
        self.errors.is_empty()
    }

    /// Finds the first finding with a given code, across all buckets.
    #[must_use]
    pub fn find(&self, code: &str) -> Option<&Finding> {
        self.errors
            .iter()
            .chain(&self.warnings)
            .chain(&self.info)
            .find(|f| f.code == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucketing() {
        let mut result = ValidationResult::new();
        result.push(Finding::error(codes::NOT_BALANCED, "off by one"));
        result.push(Finding::warning(codes::TOTALS_MISMATCH, "check totals"));
        result.push(Finding::info(codes::IDEMPOTENCY_MISSING, "no key"));

        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.info.len(), 1);
        assert!(!result.is_passing());
    }

    #[test]
    fn test_merge() {
        let mut a = ValidationResult::new();
        a.push(Finding::error(codes::NOT_BALANCED, "x"));
        let mut b = ValidationResult::new();
        b.push(Finding::info(codes::IDEMPOTENCY_MISSING, "y"));

        a.merge(b);
        assert_eq!(a.errors.len(), 1);
        assert_eq!(a.info.len(), 1);
    }

    #[test]
    fn test_find_across_buckets() {
        let mut result = ValidationResult::new();
        result.push(Finding::info(codes::IDEMPOTENCY_MISSING, "no key"));
        assert!(result.find(codes::IDEMPOTENCY_MISSING).is_some());
        assert!(result.find(codes::NOT_BALANCED).is_none());
    }

    #[test]
    fn test_metadata_builder() {
        let finding = Finding::error(codes::BANK_CASH_INSUFFICIENT, "short")
            .at("lines[1]")
            .with_meta("shortfall", 1)
            .with_meta("available", 100_000);
        assert_eq!(finding.path.as_deref(), Some("lines[1]"));
        assert_eq!(finding.metadata["shortfall"], 1);
    }
}
