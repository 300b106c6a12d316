//! Invoice line items and stock levels.

use crate::validation::context::TransactionContext;
use crate::validation::engine::Rule;
use crate::validation::findings::{codes, Finding};

/// An invoice must carry at least one line item, and billed quantities must
/// not drive tracked stock negative.
///
/// Stock levels come prefetched in `refdata.stock_levels`; items of
/// untracked goods (no entry) are not checked.
pub struct InvoiceItems;

impl Rule for InvoiceItems {
    fn name(&self) -> &'static str {
        "invoice_items"
    }

    fn check(&self, ctx: &TransactionContext) -> Vec<Finding> {
        if ctx.model.items.is_empty() {
            return vec![Finding::warning(
                codes::INV_ITEM_MISSING,
                "Invoice carries no line items",
            )];
        }

        ctx.model
            .items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| {
                let available = *ctx.refdata.stock_levels.get(&item.name)?;
                if item.quantity <= available {
                    return None;
                }
                Some(
                    Finding::error(
                        codes::INV_NEG_STOCK,
                        format!(
                            "Billing {} of '{}' exceeds available stock {available}",
                            item.quantity, item.name
                        ),
                    )
                    .at(format!("items[{i}]"))
                    .with_meta("item", item.name.clone())
                    .with_meta("quantity", item.quantity)
                    .with_meta("available", available),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocumentItem, DocumentType};
    use crate::journal::JournalLine;
    use crate::validation::testutil;
    use bahi_shared::types::MinorUnits;

    fn invoice() -> crate::validation::context::TransactionContext {
        testutil::context(
            DocumentType::Invoice,
            vec![
                JournalLine::debit("Debtors", testutil::date(), MinorUnits::new(5_000)),
                JournalLine::credit("Sales", testutil::date(), MinorUnits::new(5_000)),
            ],
        )
    }

    fn item(name: &str, quantity: i64) -> DocumentItem {
        DocumentItem {
            name: name.to_string(),
            quantity,
            rate: MinorUnits::new(500),
            amount: MinorUnits::new(500 * quantity),
        }
    }

    #[test]
    fn test_no_items_warns() {
        let ctx = invoice();
        let findings = InvoiceItems.check(&ctx);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].code, codes::INV_ITEM_MISSING);
        assert_eq!(
            findings[0].severity,
            crate::validation::findings::Severity::Warning
        );
    }

    #[test]
    fn test_untracked_item_passes() {
        let mut ctx = invoice();
        ctx.model.items = vec![item("Widget", 10)];
        assert!(InvoiceItems.check(&ctx).is_empty());
    }

    #[test]
    fn test_overselling_tracked_stock_flagged() {
        let mut ctx = invoice();
        ctx.model.items = vec![item("Widget", 10)];
        ctx.refdata.stock_levels.insert("Widget".to_string(), 4);
        let findings = InvoiceItems.check(&ctx);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].code, codes::INV_NEG_STOCK);
        assert_eq!(findings[0].metadata["available"], 4);
    }

    #[test]
    fn test_exact_stock_passes() {
        let mut ctx = invoice();
        ctx.model.items = vec![item("Widget", 4)];
        ctx.refdata.stock_levels.insert("Widget".to_string(), 4);
        assert!(InvoiceItems.check(&ctx).is_empty());
    }
}
