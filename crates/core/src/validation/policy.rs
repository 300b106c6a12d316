//! Severity override policy.
//!
//! Which codes are hard-blocking versus advisory is a caller decision, not
//! engine behavior. Rules produce natural severities; the policy may
//! downgrade or upgrade any code before bucketing.

use std::collections::BTreeMap;

use super::findings::{Finding, Severity};

/// Per-code severity overrides applied after each rule runs.
#[derive(Debug, Clone, Default)]
pub struct ValidationPolicy {
    overrides: BTreeMap<String, Severity>,
}

impl ValidationPolicy {
    /// The default policy: every rule's natural severity stands.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the severity of a code.
    #[must_use]
    pub fn with_override(mut self, code: &str, severity: Severity) -> Self {
        self.overrides.insert(code.to_string(), severity);
        self
    }

    /// Applies any override to a finding.
    #[must_use]
    pub fn apply(&self, mut finding: Finding) -> Finding {
        if let Some(&severity) = self.overrides.get(&finding.code) {
            finding.severity = severity;
        }
        finding
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::findings::codes;

    #[test]
    fn test_default_policy_keeps_severity() {
        let policy = ValidationPolicy::new();
        let finding = policy.apply(Finding::error(codes::TOTALS_MISMATCH, "x"));
        assert_eq!(finding.severity, Severity::Error);
    }

    #[test]
    fn test_override_downgrades() {
        let policy =
            ValidationPolicy::new().with_override(codes::TOTALS_MISMATCH, Severity::Warning);
        let finding = policy.apply(Finding::error(codes::TOTALS_MISMATCH, "x"));
        assert_eq!(finding.severity, Severity::Warning);
    }

    #[test]
    fn test_override_is_code_scoped() {
        let policy =
            ValidationPolicy::new().with_override(codes::TOTALS_MISMATCH, Severity::Warning);
        let finding = policy.apply(Finding::error(codes::NOT_BALANCED, "x"));
        assert_eq!(finding.severity, Severity::Error);
    }
}
