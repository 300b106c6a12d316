//! GST breakup consistency.
//!
//! Supply type is inferred from GSTIN state codes: when both our GSTIN and
//! the party's GSTIN are known, matching state codes mean intra-state
//! supply (CGST+SGST split equally, no IGST); differing codes mean
//! inter-state supply (IGST only). With either GSTIN absent the supply
//! type is unknown and the split checks stay silent, but the arithmetic
//! check (taxable + tax = grand total) still runs when the fields exist.

use crate::document::DocumentModel;
use crate::validation::context::TransactionContext;
use crate::validation::engine::Rule;
use crate::validation::findings::{codes, Finding};

/// Validates the declared GST breakup against supply type and totals.
pub struct GstBreakup;

impl Rule for GstBreakup {
    fn name(&self) -> &'static str {
        "gst_breakup"
    }

    fn check(&self, ctx: &TransactionContext) -> Vec<Finding> {
        let Some(tax) = ctx.model.tax else {
            return Vec::new();
        };
        let mut findings = Vec::new();

        let our_state = ctx.model.our_gstin.as_deref().and_then(DocumentModel::state_code);
        let party_state = ctx
            .model
            .party
            .as_ref()
            .and_then(|p| p.gstin.as_deref())
            .and_then(DocumentModel::state_code);

        if let (Some(ours), Some(theirs)) = (our_state, party_state) {
            if ours == theirs {
                if !tax.igst.is_zero() || tax.cgst != tax.sgst {
                    findings.push(
                        Finding::error(
                            codes::GST_SPLIT_INTRA,
                            "Intra-state supply must split CGST/SGST equally with no IGST",
                        )
                        .with_meta("cgst", tax.cgst.into_inner())
                        .with_meta("sgst", tax.sgst.into_inner())
                        .with_meta("igst", tax.igst.into_inner()),
                    );
                }
            } else if !tax.cgst.is_zero() || !tax.sgst.is_zero() {
                findings.push(
                    Finding::error(
                        codes::GST_SPLIT_INTER,
                        "Inter-state supply must carry IGST only",
                    )
                    .with_meta("cgst", tax.cgst.into_inner())
                    .with_meta("sgst", tax.sgst.into_inner())
                    .with_meta("igst", tax.igst.into_inner()),
                );
            }
        }

        if let (Some(taxable), Some(grand)) = (ctx.model.taxable_total, ctx.model.grand_total) {
            let computed = taxable + tax.total();
            if computed != grand {
                findings.push(
                    Finding::error(
                        codes::GST_TAX_MISMATCH,
                        format!(
                            "Taxable {taxable} plus tax {} does not equal grand total {grand}",
                            tax.total()
                        ),
                    )
                    .with_meta("taxable_total", taxable.into_inner())
                    .with_meta("tax_total", tax.total().into_inner())
                    .with_meta("grand_total", grand.into_inner()),
                );
            }
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocumentType, PartyInfo, TaxBreakup};
    use crate::journal::JournalLine;
    use crate::validation::context::TransactionContext;
    use crate::validation::testutil;
    use bahi_shared::types::MinorUnits;

    fn invoice_ctx(our: &str, party: &str, tax: TaxBreakup) -> TransactionContext {
        let mut ctx = testutil::context(
            DocumentType::Invoice,
            vec![
                JournalLine::debit("Debtors", testutil::date(), MinorUnits::new(11_800)),
                JournalLine::credit("Sales", testutil::date(), MinorUnits::new(11_800)),
            ],
        );
        ctx.model.our_gstin = Some(our.to_string());
        ctx.model.party = Some(PartyInfo {
            name: "Acme Traders".to_string(),
            gstin: Some(party.to_string()),
        });
        ctx.model.tax = Some(tax);
        ctx.model.taxable_total = Some(MinorUnits::new(10_000));
        ctx.model.grand_total = Some(MinorUnits::new(11_800));
        ctx
    }

    #[test]
    fn test_intra_state_equal_split_passes() {
        let ctx = invoice_ctx(
            "27AAPFU0939F1ZV",
            "27BBPFU0939F1ZV",
            TaxBreakup {
                cgst: MinorUnits::new(900),
                sgst: MinorUnits::new(900),
                igst: MinorUnits::ZERO,
            },
        );
        assert!(GstBreakup.check(&ctx).is_empty());
    }

    #[test]
    fn test_intra_state_with_igst_flagged() {
        let ctx = invoice_ctx(
            "27AAPFU0939F1ZV",
            "27BBPFU0939F1ZV",
            TaxBreakup {
                cgst: MinorUnits::ZERO,
                sgst: MinorUnits::ZERO,
                igst: MinorUnits::new(1_800),
            },
        );
        let findings = GstBreakup.check(&ctx);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].code, codes::GST_SPLIT_INTRA);
    }

    #[test]
    fn test_intra_state_unequal_split_flagged() {
        let ctx = invoice_ctx(
            "27AAPFU0939F1ZV",
            "27BBPFU0939F1ZV",
            TaxBreakup {
                cgst: MinorUnits::new(1_000),
                sgst: MinorUnits::new(800),
                igst: MinorUnits::ZERO,
            },
        );
        assert!(GstBreakup
            .check(&ctx)
            .iter()
            .any(|f| f.code == codes::GST_SPLIT_INTRA));
    }

    #[test]
    fn test_inter_state_igst_only_passes() {
        let ctx = invoice_ctx(
            "27AAPFU0939F1ZV",
            "29BBPFU0939F1ZV",
            TaxBreakup {
                cgst: MinorUnits::ZERO,
                sgst: MinorUnits::ZERO,
                igst: MinorUnits::new(1_800),
            },
        );
        assert!(GstBreakup.check(&ctx).is_empty());
    }

    #[test]
    fn test_inter_state_with_cgst_flagged() {
        let ctx = invoice_ctx(
            "27AAPFU0939F1ZV",
            "29BBPFU0939F1ZV",
            TaxBreakup {
                cgst: MinorUnits::new(900),
                sgst: MinorUnits::new(900),
                igst: MinorUnits::ZERO,
            },
        );
        assert!(GstBreakup
            .check(&ctx)
            .iter()
            .any(|f| f.code == codes::GST_SPLIT_INTER));
    }

    #[test]
    fn test_arithmetic_mismatch_flagged() {
        let mut ctx = invoice_ctx(
            "27AAPFU0939F1ZV",
            "27BBPFU0939F1ZV",
            TaxBreakup {
                cgst: MinorUnits::new(900),
                sgst: MinorUnits::new(900),
                igst: MinorUnits::ZERO,
            },
        );
        ctx.model.grand_total = Some(MinorUnits::new(11_801));
        let findings = GstBreakup.check(&ctx);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].code, codes::GST_TAX_MISMATCH);
    }

    #[test]
    fn test_unknown_supply_type_skips_split_checks() {
        let mut ctx = invoice_ctx(
            "27AAPFU0939F1ZV",
            "29BBPFU0939F1ZV",
            TaxBreakup {
                cgst: MinorUnits::new(900),
                sgst: MinorUnits::new(900),
                igst: MinorUnits::ZERO,
            },
        );
        ctx.model.party = None;
        assert!(GstBreakup.check(&ctx).is_empty());
    }

    #[test]
    fn test_no_tax_silent() {
        let mut ctx = invoice_ctx(
            "27AAPFU0939F1ZV",
            "27BBPFU0939F1ZV",
            TaxBreakup::default(),
        );
        ctx.model.tax = None;
        assert!(GstBreakup.check(&ctx).is_empty());
    }
}
