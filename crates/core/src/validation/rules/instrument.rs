//! Cash/bank instrument hygiene.

use std::collections::BTreeSet;

use crate::accounts::AccountClass;
use crate::validation::context::TransactionContext;
use crate::validation::engine::Rule;
use crate::validation::findings::{codes, Finding};

/// How many distinct instruments a document type may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InstrumentShape {
    /// Receipts and payments: exactly one cash/bank instrument.
    Single,
    /// Contra vouchers: exactly two, of differing class.
    Contra,
}

/// Constrains which cash/bank instruments a document may move.
pub struct InstrumentHygiene {
    shape: InstrumentShape,
}

impl InstrumentHygiene {
    /// Receipts and payment vouchers move exactly one instrument.
    #[must_use]
    pub fn single() -> Self {
        Self {
            shape: InstrumentShape::Single,
        }
    }

    /// Contra vouchers move between exactly two instruments, and mixing
    /// cash against cash is fine but a cash leg and a bank leg must not be
    /// collapsed into one.
    #[must_use]
    pub fn contra() -> Self {
        Self {
            shape: InstrumentShape::Contra,
        }
    }

    fn instruments<'a>(&self, ctx: &'a TransactionContext) -> Vec<(&'a str, AccountClass)> {
        let mut seen = BTreeSet::new();
        ctx.effective_lines()
            .filter_map(|(_, line)| {
                let account = ctx.account(&line.account)?;
                if account.class.is_instrument() && seen.insert(line.account.as_str()) {
                    Some((line.account.as_str(), account.class))
                } else {
                    None
                }
            })
            .collect()
    }
}

impl Rule for InstrumentHygiene {
    fn name(&self) -> &'static str {
        match self.shape {
            InstrumentShape::Single => "instrument_single",
            InstrumentShape::Contra => "instrument_contra",
        }
    }

    fn check(&self, ctx: &TransactionContext) -> Vec<Finding> {
        let instruments = self.instruments(ctx);
        let names: Vec<&str> = instruments.iter().map(|(name, _)| *name).collect();
        let classes: BTreeSet<AccountClass> =
            instruments.iter().map(|(_, class)| *class).collect();

        match self.shape {
            InstrumentShape::Single => {
                let mut findings = Vec::new();
                if instruments.len() != 1 {
                    findings.push(
                        Finding::error(
                            codes::BANK_SINGLELINE,
                            format!(
                                "Document must move exactly one cash/bank instrument, found {}",
                                instruments.len()
                            ),
                        )
                        .with_meta("instruments", names.clone()),
                    );
                }
                if classes.contains(&AccountClass::Cash) && classes.contains(&AccountClass::Bank) {
                    findings.push(
                        Finding::error(
                            codes::BANK_MIXED,
                            "Cash and bank instruments mixed in one document",
                        )
                        .with_meta("instruments", names),
                    );
                }
                findings
            }
            InstrumentShape::Contra => {
                if instruments.len() == 2 {
                    Vec::new()
                } else {
                    vec![Finding::error(
                        codes::BANK_SINGLELINE,
                        format!(
                            "Contra must move exactly two instruments, found {}",
                            instruments.len()
                        ),
                    )
                    .with_meta("instruments", names)]
                }
            }
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
    fn test_single_instrument_passes() {
        let ctx = testutil::context(
            DocumentType::PaymentVoucher,
            vec![
                JournalLine::debit("Office Expenses", testutil::date(), MinorUnits::new(500)),
                JournalLine::credit("Bank", testutil::date(), MinorUnits::new(500)),
            ],
        );
        assert!(InstrumentHygiene::single().check(&ctx).is_empty());
    }

    #[test]
    fn test_two_instruments_on_payment_flagged() {
        let ctx = testutil::context(
            DocumentType::PaymentVoucher,
            vec![
                JournalLine::debit("Office Expenses", testutil::date(), MinorUnits::new(500)),
                JournalLine::credit("Bank", testutil::date(), MinorUnits::new(300)),
                JournalLine::credit("Cash", testutil::date(), MinorUnits::new(200)),
            ],
        );
        let findings = InstrumentHygiene::single().check(&ctx);
        assert!(findings.iter().any(|f| f.code == codes::BANK_SINGLELINE));
        assert!(findings.iter().any(|f| f.code == codes::BANK_MIXED));
    }

    #[test]
    fn test_no_instrument_on_receipt_flagged() {
        let ctx = testutil::context(
            DocumentType::Receipt,
            vec![
                JournalLine::debit("Debtors", testutil::date(), MinorUnits::new(500)),
                JournalLine::credit("Sales", testutil::date(), MinorUnits::new(500)),
            ],
        );
        let findings = InstrumentHygiene::single().check(&ctx);
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn test_contra_between_bank_and_cash_passes() {
        let ctx = testutil::context(
            DocumentType::ContraVoucher,
            vec![
                JournalLine::debit("Cash", testutil::date(), MinorUnits::new(500)),
                JournalLine::credit("Bank", testutil::date(), MinorUnits::new(500)),
            ],
        );
        assert!(InstrumentHygiene::contra().check(&ctx).is_empty());
    }

    #[test]
    fn test_contra_needs_two_instruments() {
        let ctx = testutil::context(
            DocumentType::ContraVoucher,
            vec![
                JournalLine::debit("Office Expenses", testutil::date(), MinorUnits::new(500)),
                JournalLine::credit("Bank", testutil::date(), MinorUnits::new(500)),
            ],
        );
        let findings = InstrumentHygiene::contra().check(&ctx);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].code, codes::BANK_SINGLELINE);
    }
}
