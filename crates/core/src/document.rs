//! Document types and the derived document model.
//!
//! The document model is what an upstream extraction step (or a manual
//! editor) derives from a raw document: dates, totals, tax fields, party
//! info, and line items. It is untrusted input and is validated in full.

use bahi_shared::types::MinorUnits;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Document type classification.
///
/// Each type carries its own validation rule pack and number series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Sales invoice.
    Invoice,
    /// Money received (cash/bank inflow).
    Receipt,
    /// Money paid out (cash/bank outflow).
    PaymentVoucher,
    /// Transfer between cash/bank instruments.
    ContraVoucher,
    /// General journal entry.
    Journal,
}

impl DocumentType {
    /// Returns true if a posted document of this type carries a
    /// human-readable document record (invoice/receipt/voucher metadata).
    #[must_use]
    pub const fn has_document_record(self) -> bool {
        !matches!(self, Self::Journal)
    }

    /// All document types, in rule-pack registration order.
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::Invoice,
            Self::Receipt,
            Self::PaymentVoucher,
            Self::ContraVoucher,
            Self::Journal,
        ]
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Invoice => "invoice",
            Self::Receipt => "receipt",
            Self::PaymentVoucher => "payment_voucher",
            Self::ContraVoucher => "contra_voucher",
            Self::Journal => "journal",
        };
        write!(f, "{name}")
    }
}

/// Counterparty details extracted from the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyInfo {
    /// Party display name.
    pub name: String,
    /// Party GSTIN, when known. The first two characters are the state code.
    pub gstin: Option<String>,
}

/// Declared GST breakup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaxBreakup {
    /// Central GST component.
    pub cgst: MinorUnits,
    /// State GST component.
    pub sgst: MinorUnits,
    /// Integrated GST component.
    pub igst: MinorUnits,
}

impl TaxBreakup {
    /// Total declared tax across all components.
    #[must_use]
    pub fn total(self) -> MinorUnits {
        self.cgst + self.sgst + self.igst
    }
}

/// Declared TDS (tax deducted at source) details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TdsDetail {
    /// Statutory section under which tax is deducted (e.g. "194C").
    pub section: Option<String>,
    /// Declared deduction amount.
    pub amount: MinorUnits,
}

/// A line item on an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentItem {
    /// Item name as it appears on the document.
    pub name: String,
    /// Quantity in whole units.
    pub quantity: i64,
    /// Per-unit rate.
    pub rate: MinorUnits,
    /// Extended line amount.
    pub amount: MinorUnits,
}

/// The derived document model: structured fields extracted from a document
/// or assembled by a manual editor. All fields besides the date are
/// optional; rules that need an absent field emit no finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentModel {
    /// Document date.
    pub date: NaiveDate,
    /// Counterparty, when the document names one.
    pub party: Option<PartyInfo>,
    /// Our own GSTIN (determines intra- vs inter-state supply).
    pub our_gstin: Option<String>,
    /// Declared taxable total.
    pub taxable_total: Option<MinorUnits>,
    /// Declared GST breakup.
    pub tax: Option<TaxBreakup>,
    /// Declared grand total.
    pub grand_total: Option<MinorUnits>,
    /// Declared TDS details.
    pub tds: Option<TdsDetail>,
    /// Invoice line items.
    #[serde(default)]
    pub items: Vec<DocumentItem>,
    /// External document reference (bill number, cheque number) used for
    /// duplicate detection.
    pub reference: Option<String>,
}

impl DocumentModel {
    /// A minimal model carrying only a date, for journal-style entries.
    #[must_use]
    pub fn bare(date: NaiveDate) -> Self {
        Self {
            date,
            party: None,
            our_gstin: None,
            taxable_total: None,
            tax: None,
            grand_total: None,
            tds: None,
            items: Vec::new(),
            reference: None,
        }
    }

    /// The GST state code (first two GSTIN characters) of a GSTIN string.
    #[must_use]
    pub fn state_code(gstin: &str) -> Option<&str> {
        if gstin.len() >= 2 {
            Some(&gstin[..2])
        } else {
            None
        }
    }
}
