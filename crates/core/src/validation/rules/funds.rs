//! The funds guard.

use crate::funds::net_outflows;
use crate::validation::context::TransactionContext;
use crate::validation::engine::Rule;
use crate::validation::findings::{codes, Finding};

/// Net outflow from a monitored cash/bank instrument must not exceed its
/// available headroom on the posting date.
///
/// Headroom (balance, facility limits, active holds already netted) is
/// prefetched into `refdata.headroom` per (account, date); an outflow with
/// no headroom entry is skipped rather than failed.
pub struct FundsGuard;

impl Rule for FundsGuard {
    fn name(&self) -> &'static str {
        "funds_guard"
    }

    fn check(&self, ctx: &TransactionContext) -> Vec<Finding> {
        let outflows = net_outflows(&ctx.lines, |account| ctx.is_instrument(account));

        outflows
            .into_iter()
            .filter_map(|((account, date), outflow)| {
                let available = *ctx.refdata.headroom.get(&(account.clone(), date))?;
                if outflow <= available {
                    return None;
                }
                let shortfall = outflow - available;
                Some(
                    Finding::error(
                        codes::BANK_CASH_INSUFFICIENT,
                        format!(
                            "Outflow of {outflow} from '{account}' on {date} exceeds available {available}"
                        ),
                    )
                    .with_meta("account", account)
                    .with_meta("date", date.to_string())
                    .with_meta("outflow", outflow.into_inner())
                    .with_meta("available", available.into_inner())
                    .with_meta("shortfall", shortfall.into_inner()),
                )
            })
            .collect()
    }
}
