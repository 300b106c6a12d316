//! Balance equality.

use crate::journal::line::totals;
use crate::validation::context::TransactionContext;
use crate::validation::engine::Rule;
use crate::validation::findings::{codes, Finding};

/// Debit and credit totals must be equal, exactly, in minor units.
pub struct Balanced;

impl Rule for Balanced {
    fn name(&self) -> &'static str {
        "balanced"
    }

    fn check(&self, ctx: &TransactionContext) -> Vec<Finding> {
        let (debits, credits) = totals(&ctx.lines);
        if debits == credits {
            Vec::new()
        } else {
            vec![Finding::error(
                codes::NOT_BALANCED,
                format!("Debits ({debits}) do not equal credits ({credits})"),
            )
            .with_meta("debit_total", debits.into_inner())
            .with_meta("credit_total", credits.into_inner())]
        }
    }
}
