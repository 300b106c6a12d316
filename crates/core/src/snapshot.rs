//! Canonical preview payload hashing and snapshot states.
//!
//! A preview snapshot freezes "what the user is about to confirm". The
//! content hash is a SHA-256 digest over the canonical JSON encoding of the
//! payload; `serde_json`'s default map representation sorts object keys, so
//! semantically identical payloads hash identically regardless of how they
//! were constructed.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::document::{DocumentModel, DocumentType};
use crate::journal::{JournalLine, LedgerPair};

/// Lifecycle of a preview snapshot.
///
/// Exactly one successful confirm is allowed per snapshot; USED is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SnapshotStatus {
    /// Confirmable until expiry.
    Active,
    /// Consumed by a successful commit.
    Used,
}

/// Invalid snapshot state transition.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid snapshot transition: {from:?} -> {to:?}")]
pub struct InvalidTransition {
    /// Current status.
    pub from: SnapshotStatus,
    /// Requested status.
    pub to: SnapshotStatus,
}

impl SnapshotStatus {
    /// Validates a requested transition. ACTIVE→USED is the only legal move.
    pub fn transition_to(self, to: Self) -> Result<Self, InvalidTransition> {
        match (self, to) {
            (Self::Active, Self::Used) => Ok(to),
            _ => Err(InvalidTransition { from: self, to }),
        }
    }
}

/// The frozen content of a preview: the document model, the source lines,
/// the paired journal, and the number reserved for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewPayload {
    /// Document type being posted.
    pub doc_type: DocumentType,
    /// The reserved document number.
    pub number: String,
    /// Derived document model.
    pub model: DocumentModel,
    /// Source journal lines as validated.
    pub lines: Vec<JournalLine>,
    /// Paired journal ready for permanent storage.
    pub pairs: Vec<LedgerPair>,
}

/// Computes the canonical content hash of a JSON value.
///
/// The value is re-serialized through `serde_json::Value` (BTreeMap-backed
/// objects, keys sorted) before digesting, so construction order never
/// affects the hash.
#[must_use]
pub fn canonical_hash(value: &serde_json::Value) -> String {
    let canonical = value.to_string();
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    format!("{:x}", hasher.finalize())
}

impl PreviewPayload {
    /// Serializes the payload and computes its canonical hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be represented as JSON.
    pub fn hash(&self) -> Result<String, serde_json::Error> {
        let value = serde_json::to_value(self)?;
        Ok(canonical_hash(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bahi_shared::types::MinorUnits;
    use chrono::NaiveDate;
    use serde_json::json;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
    }

    fn sample_payload() -> PreviewPayload {
        PreviewPayload {
            doc_type: DocumentType::PaymentVoucher,
            number: "PV-2025-00001".to_string(),
            model: DocumentModel::bare(date()),
            lines: vec![
                JournalLine::debit("Office Expenses", date(), MinorUnits::new(500)),
                JournalLine::credit("Bank", date(), MinorUnits::new(500)),
            ],
            pairs: vec![LedgerPair {
                debit_account: "Office Expenses".to_string(),
                credit_account: "Bank".to_string(),
                amount: MinorUnits::new(500),
                date: date(),
                narration: None,
            }],
        }
    }

    #[test]
    fn test_hash_is_stable() {
        let payload = sample_payload();
        assert_eq!(payload.hash().unwrap(), payload.hash().unwrap());
    }

    #[test]
    fn test_hash_is_key_order_independent() {
        let a = json!({"alpha": 1, "beta": {"x": 2, "y": 3}});
        let b = json!({"beta": {"y": 3, "x": 2}, "alpha": 1});
        assert_eq!(canonical_hash(&a), canonical_hash(&b));
    }

    #[test]
    fn test_hash_detects_tampering() {
        let payload = sample_payload();
        let mut tampered = payload.clone();
        tampered.pairs[0].amount = MinorUnits::new(501);
        assert_ne!(payload.hash().unwrap(), tampered.hash().unwrap());
    }

    #[test]
    fn test_hash_is_hex_sha256() {
        let hash = sample_payload().hash().unwrap();
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_payload_roundtrip() {
        let payload = sample_payload();
        let value = serde_json::to_value(&payload).unwrap();
        let back: PreviewPayload = serde_json::from_value(value).unwrap();
        assert_eq!(back, payload);
    }

    #[test]
    fn test_snapshot_transitions() {
        assert_eq!(
            SnapshotStatus::Active.transition_to(SnapshotStatus::Used),
            Ok(SnapshotStatus::Used)
        );
        assert!(SnapshotStatus::Used
            .transition_to(SnapshotStatus::Used)
            .is_err());
        assert!(SnapshotStatus::Used
            .transition_to(SnapshotStatus::Active)
            .is_err());
        assert!(SnapshotStatus::Active
            .transition_to(SnapshotStatus::Active)
            .is_err());
    }
}
