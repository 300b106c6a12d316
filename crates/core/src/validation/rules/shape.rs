//! Structural shape rules.

use crate::validation::context::TransactionContext;
use crate::validation::engine::Rule;
use crate::validation::findings::{codes, Finding};

/// A posting needs at least two effective lines.
pub struct MinLineShape;

impl Rule for MinLineShape {
    fn name(&self) -> &'static str {
        "min_line_shape"
    }

    fn check(&self, ctx: &TransactionContext) -> Vec<Finding> {
        let effective = ctx.effective_lines().count();
        if effective < 2 {
            vec![Finding::error(
                codes::SHAPE_MIN_LINES,
                format!("A posting needs at least 2 lines, got {effective}"),
            )
            .with_meta("line_count", effective)]
        } else {
            Vec::new()
        }
    }
}

/// Each line must carry exactly one strictly positive side.
pub struct DrCrExclusive;

impl Rule for DrCrExclusive {
    fn name(&self) -> &'static str {
        "drcr_exclusive"
    }

    fn check(&self, ctx: &TransactionContext) -> Vec<Finding> {
        ctx.effective_lines()
            .filter(|(_, line)| !line.has_valid_shape())
            .map(|(i, line)| {
                Finding::error(
                    codes::DRCR_EXCLUSIVE,
                    format!(
                        "Line for '{}' must have exactly one of debit/credit positive",
                        line.account
                    ),
                )
                .at(format!("lines[{i}]"))
                .with_meta("debit", line.debit.into_inner())
                .with_meta("credit", line.credit.into_inner())
            })
            .collect()
    }
}
