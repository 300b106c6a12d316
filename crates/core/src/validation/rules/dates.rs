//! Posting-date rules.

use crate::fiscal;
use crate::validation::context::TransactionContext;
use crate::validation::engine::Rule;
use crate::validation::findings::{codes, Finding};

/// Line dates must match the document date and must not be future-dated.
///
/// Future-dating is checked against `refdata.today`; when the orchestrator
/// leaves it unset the check is disabled.
pub struct DateValid;

impl Rule for DateValid {
    fn name(&self) -> &'static str {
        "date_valid"
    }

    fn check(&self, ctx: &TransactionContext) -> Vec<Finding> {
        let mut findings = Vec::new();

        for (i, line) in ctx.effective_lines() {
            if line.date != ctx.model.date {
                findings.push(
                    Finding::error(
                        codes::DATE_INVALID,
                        format!(
                            "Line date {} differs from document date {}",
                            line.date, ctx.model.date
                        ),
                    )
                    .at(format!("lines[{i}]"))
                    .with_meta("line_date", line.date.to_string())
                    .with_meta("document_date", ctx.model.date.to_string()),
                );
            }
        }

        if let Some(today) = ctx.refdata.today {
            if ctx.model.date > today {
                findings.push(
                    Finding::error(
                        codes::DATE_INVALID,
                        format!("Document date {} is in the future", ctx.model.date),
                    )
                    .with_meta("document_date", ctx.model.date.to_string())
                    .with_meta("today", today.to_string()),
                );
            }
        }

        findings
    }
}

/// Postings into a locked period are rejected.
pub struct PeriodLock;

impl Rule for PeriodLock {
    fn name(&self) -> &'static str {
        "period_lock"
    }

    fn check(&self, ctx: &TransactionContext) -> Vec<Finding> {
        if fiscal::is_period_locked(ctx.model.date, ctx.refdata.locked_through) {
            let cutoff = ctx
                .refdata
                .locked_through
                .map(|d| d.to_string())
                .unwrap_or_default();
            vec![Finding::error(
                codes::PERIOD_LOCKED,
                format!(
                    "Date {} falls in a period locked through {cutoff}",
                    ctx.model.date
                ),
            )
            .with_meta("document_date", ctx.model.date.to_string())
            .with_meta("locked_through", cutoff)]
        } else {
            Vec::new()
        }
    }
}
