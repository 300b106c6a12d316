//! Document number formats and the reservation state machine.
//!
//! Numbers are issued per (tenant, document type, fiscal year) as
//! `PREFIX-YEAR-00001`. The sequence counter only ever moves forward: gaps
//! from abandoned previews are acceptable, duplicates never are.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::DocumentType;

/// Maximum increment-read-insert attempts before reservation gives up.
///
/// A uniqueness conflict on the reservation insert (crash-recovery replay)
/// restarts the whole cycle; exhausting the cap is a retryable-fatal
/// service error, never a silently duplicated number.
pub const MAX_RESERVE_ATTEMPTS: u32 = 25;

/// Width of the zero-padded sequence component.
pub const SEQUENCE_WIDTH: usize = 5;

/// Lifecycle of a number reservation.
///
/// HELD is the only live state. USED and EXPIRED are terminal and immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReservationStatus {
    /// Drawn but not yet committed; subject to TTL expiry.
    Held,
    /// Consumed by a successful commit.
    Used,
    /// Cancelled or timed out; the number is burned, never reissued.
    Expired,
}

/// Invalid reservation state transition.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid reservation transition: {from:?} -> {to:?}")]
pub struct InvalidTransition {
    /// Current status.
    pub from: ReservationStatus,
    /// Requested status.
    pub to: ReservationStatus,
}

impl ReservationStatus {
    /// Validates a requested transition. Only HELD→USED and HELD→EXPIRED
    /// are legal.
    pub fn transition_to(self, to: Self) -> Result<Self, InvalidTransition> {
        match (self, to) {
            (Self::Held, Self::Used) | (Self::Held, Self::Expired) => Ok(to),
            _ => Err(InvalidTransition { from: self, to }),
        }
    }

    /// True when the reservation can still be finalized or expired.
    #[must_use]
    pub const fn is_live(self) -> bool {
        matches!(self, Self::Held)
    }
}

/// Series prefix for a document type.
#[must_use]
pub const fn series_prefix(doc_type: DocumentType) -> &'static str {
    match doc_type {
        DocumentType::Invoice => "INV",
        DocumentType::Receipt => "RCT",
        DocumentType::PaymentVoucher => "PV",
        DocumentType::ContraVoucher => "CV",
        DocumentType::Journal => "JV",
    }
}

/// Formats a document number for a drawn sequence value.
#[must_use]
pub fn format_number(doc_type: DocumentType, fiscal_year: i32, sequence: i64) -> String {
    format!(
        "{}-{}-{:0width$}",
        series_prefix(doc_type),
        fiscal_year,
        sequence,
        width = SEQUENCE_WIDTH
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes() {
        assert_eq!(series_prefix(DocumentType::Invoice), "INV");
        assert_eq!(series_prefix(DocumentType::Receipt), "RCT");
        assert_eq!(series_prefix(DocumentType::PaymentVoucher), "PV");
        assert_eq!(series_prefix(DocumentType::ContraVoucher), "CV");
        assert_eq!(series_prefix(DocumentType::Journal), "JV");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(
            format_number(DocumentType::PaymentVoucher, 2025, 1),
            "PV-2025-00001"
        );
        assert_eq!(
            format_number(DocumentType::Invoice, 2025, 12_345),
            "INV-2025-12345"
        );
        // Width is a floor, not a ceiling.
        assert_eq!(
            format_number(DocumentType::Journal, 2025, 123_456),
            "JV-2025-123456"
        );
    }

    #[test]
    fn test_valid_transitions() {
        assert_eq!(
            ReservationStatus::Held.transition_to(ReservationStatus::Used),
            Ok(ReservationStatus::Used)
        );
        assert_eq!(
            ReservationStatus::Held.transition_to(ReservationStatus::Expired),
            Ok(ReservationStatus::Expired)
        );
    }

    #[test]
    fn test_terminal_states_immutable() {
        for terminal in [ReservationStatus::Used, ReservationStatus::Expired] {
            for to in [
                ReservationStatus::Held,
                ReservationStatus::Used,
                ReservationStatus::Expired,
            ] {
                assert!(terminal.transition_to(to).is_err());
            }
        }
        assert!(ReservationStatus::Held
            .transition_to(ReservationStatus::Held)
            .is_err());
    }

    #[test]
    fn test_liveness() {
        assert!(ReservationStatus::Held.is_live());
        assert!(!ReservationStatus::Used.is_live());
        assert!(!ReservationStatus::Expired.is_live());
    }
}
