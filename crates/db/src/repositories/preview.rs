//! The preview orchestrator.
//!
//! One transaction per preview: provision referenced ledgers, prefetch the
//! validation reference data, run the full rule pack, pair the lines, then
//! (when passing) place funds holds, reserve a document number, and stage
//! the snapshot. Nothing is staged for an invalid preview, but provisioned
//! ledgers are kept.

use std::collections::BTreeMap;

use bahi_core::document::{DocumentModel, DocumentType};
use bahi_core::fiscal;
use bahi_core::funds::net_outflows;
use bahi_core::journal::{pair_lines, JournalLine, LedgerPair};
use bahi_core::snapshot::PreviewPayload;
use bahi_core::validation::{
    self, codes, Finding, RefData, TransactionContext, ValidationPolicy, ValidationResult,
};
use bahi_shared::config::PreviewConfig;
use bahi_shared::error::AppResult;
use bahi_shared::types::{AccountId, MinorUnits, PreviewId, TenantId};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use super::{account, funds, series, snapshot};

/// A proposed transaction, as handed over by the upstream collaborator or
/// a manual editor.
#[derive(Debug, Clone)]
pub struct PreviewRequest {
    /// Owning tenant.
    pub tenant: TenantId,
    /// Document type hint.
    pub doc_type: DocumentType,
    /// Candidate single-sided lines.
    pub lines: Vec<JournalLine>,
    /// Derived document model.
    pub model: DocumentModel,
    /// Client idempotency key, echoed into validation.
    pub idempotency_key: Option<String>,
    /// Severity override policy.
    pub policy: ValidationPolicy,
}

/// Outcome status of a preview attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewStatus {
    /// Staged and confirmable.
    Preview,
    /// Validation failed; nothing was staged.
    Invalid,
    /// The input carried nothing postable; upstream needs more information.
    FollowupNeeded,
}

/// Everything a caller needs to render the preview and later confirm it.
#[derive(Debug, Clone)]
pub struct PreviewOutcome {
    /// Outcome status.
    pub status: PreviewStatus,
    /// Staged preview ID (when status is `Preview`).
    pub preview_id: Option<PreviewId>,
    /// Content hash the confirm call must echo back.
    pub hash: Option<String>,
    /// Assigned document number.
    pub number: Option<String>,
    /// When the staged preview stops being confirmable.
    pub expires_at: Option<DateTime<Utc>>,
    /// The paired journal.
    pub pairs: Vec<LedgerPair>,
    /// Human-readable ledger view, one string per pair.
    pub ledger_view: Vec<String>,
    /// Full validation result, errors and all.
    pub result: ValidationResult,
}

impl PreviewOutcome {
    fn unstaged(status: PreviewStatus, pairs: Vec<LedgerPair>, result: ValidationResult) -> Self {
        let ledger_view = render_ledger_view(&pairs);
        Self {
            status,
            preview_id: None,
            hash: None,
            number: None,
            expires_at: None,
            pairs,
            ledger_view,
            result,
        }
    }
}

/// Stages previews. Owns the transaction boundary for the whole pipeline
/// up to (but excluding) confirm.
#[derive(Debug, Clone)]
pub struct PreviewService {
    db: DatabaseConnection,
    config: PreviewConfig,
}

impl PreviewService {
    /// Creates the service.
    #[must_use]
    pub const fn new(db: DatabaseConnection, config: PreviewConfig) -> Self {
        Self { db, config }
    }

    /// Validates, pairs, reserves, and stages one proposed transaction.
    ///
    /// # Errors
    ///
    /// Returns `ServiceUnavailable` when number reservation exhausts its
    /// attempt cap, or a database error. Validation failures are NOT
    /// errors; they come back as an `Invalid` outcome.
    pub async fn preview(&self, request: PreviewRequest) -> AppResult<PreviewOutcome> {
        if request
            .lines
            .iter()
            .filter(|line| !line.is_zero())
            .count()
            == 0
        {
            return Ok(PreviewOutcome::unstaged(
                PreviewStatus::FollowupNeeded,
                Vec::new(),
                ValidationResult::new(),
            ));
        }

        let txn = self.db.begin().await.map_err(crate::map_db_err)?;
        let now = Utc::now();

        let names: Vec<String> = {
            let mut names: Vec<String> =
                request.lines.iter().map(|l| l.account.clone()).collect();
            names.sort();
            names.dedup();
            names
        };
        let accounts = account::ensure_accounts(&txn, request.tenant, &names).await?;

        let refdata =
            build_refdata(&txn, &request, &accounts, now).await?;
        let ctx = TransactionContext {
            tenant: request.tenant,
            doc_type: request.doc_type,
            lines: request.lines.clone(),
            model: request.model.clone(),
            idempotency_key: request.idempotency_key.clone(),
            refdata,
            policy: request.policy.clone(),
        };
        let mut result = validation::validate(&ctx);

        let pairs = pair_lines(&request.lines);
        for (i, pair) in pairs.iter().enumerate() {
            if pair.is_self_pair() {
                result.push(ctx.policy.apply(
                    Finding::error(
                        codes::SAME_ACCOUNT_PAIR,
                        format!(
                            "Cannot post a pair debiting and crediting '{}'",
                            pair.debit_account
                        ),
                    )
                    .at(format!("pairs[{i}]"))
                    .with_meta("account", pair.debit_account.clone()),
                ));
            }
        }

        if !result.is_passing() {
            // Keep provisioned ledgers; stage nothing.
            txn.commit().await.map_err(crate::map_db_err)?;
            return Ok(PreviewOutcome::unstaged(
                PreviewStatus::Invalid,
                pairs,
                result,
            ));
        }

        let fiscal_year = fiscal::fiscal_year_for(request.model.date);
        let reservation = series::reserve_next(
            &txn,
            request.tenant,
            request.doc_type,
            fiscal_year,
            now + Duration::seconds(i64::try_from(self.config.reservation_ttl_secs).unwrap_or(900)),
        )
        .await?;

        let payload = PreviewPayload {
            doc_type: request.doc_type,
            number: reservation.number.clone(),
            model: request.model.clone(),
            lines: request.lines.clone(),
            pairs: pairs.clone(),
        };
        let snapshot_expires =
            now + Duration::seconds(i64::try_from(self.config.snapshot_ttl_secs).unwrap_or(900));
        let (preview_id, hash) = snapshot::create(
            &txn,
            request.tenant,
            &payload,
            reservation.id,
            snapshot_expires,
        )
        .await?;

        let outflow_ids = resolve_outflows(&request.lines, &accounts, &ctx);
        funds::create_holds(
            &txn,
            request.tenant,
            preview_id,
            &outflow_ids,
            now + Duration::seconds(i64::try_from(self.config.hold_ttl_secs).unwrap_or(900)),
        )
        .await?;

        txn.commit().await.map_err(crate::map_db_err)?;
        tracing::info!(
            tenant = %request.tenant,
            preview = %preview_id,
            number = %reservation.number,
            pairs = pairs.len(),
            "preview staged"
        );

        let ledger_view = render_ledger_view(&pairs);
        Ok(PreviewOutcome {
            status: PreviewStatus::Preview,
            preview_id: Some(preview_id),
            hash: Some(hash),
            number: Some(reservation.number),
            expires_at: Some(snapshot_expires),
            pairs,
            ledger_view,
            result,
        })
    }
}

async fn build_refdata<C: ConnectionTrait>(
    db: &C,
    request: &PreviewRequest,
    accounts: &BTreeMap<String, validation::AccountRef>,
    now: DateTime<Utc>,
) -> AppResult<RefData> {
    let mut refdata = RefData {
        accounts: accounts.clone(),
        today: Some(now.date_naive()),
        ..RefData::default()
    };

    refdata.locked_through = account::locked_through(db, request.tenant).await?;

    if let Some(reference) = request.model.reference.as_deref() {
        refdata.duplicate_reference =
            account::reference_exists(db, request.tenant, reference).await?;
    }

    // Lock each monitored account row before reading its headroom; the
    // lock is held until this preview's transaction commits, so the
    // holds it places are visible to the next preview's read. BTreeMap
    // iteration gives every caller the same lock order.
    let outflows = net_outflows(&request.lines, |name| {
        accounts.get(name).is_some_and(|a| a.class.is_instrument())
    });
    for ((name, date), _) in outflows {
        let Some(account) = accounts.get(&name) else {
            continue;
        };
        account::lock_for_update(db, account.id).await?;
        let headroom =
            funds::available_headroom(db, request.tenant, account.id, date, now).await?;
        refdata.headroom.insert((name, date), headroom);
    }

    Ok(refdata)
}

fn resolve_outflows(
    lines: &[JournalLine],
    accounts: &BTreeMap<String, validation::AccountRef>,
    ctx: &TransactionContext,
) -> BTreeMap<(AccountId, NaiveDate), MinorUnits> {
    net_outflows(lines, |name| ctx.is_instrument(name))
        .into_iter()
        .filter_map(|((name, date), amount)| {
            accounts.get(&name).map(|a| ((a.id, date), amount))
        })
        .collect()
}

fn render_ledger_view(pairs: &[LedgerPair]) -> Vec<String> {
    pairs
        .iter()
        .map(|pair| {
            format!(
                "{} Dr {}  To {} {}",
                pair.debit_account,
                pair.amount.to_decimal(),
                pair.credit_account,
                pair.amount.to_decimal()
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bahi_shared::types::MinorUnits;
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
    }

    #[test]
    fn test_ledger_view_renders_major_units() {
        let pairs = vec![LedgerPair {
            debit_account: "Office Expenses".to_string(),
            credit_account: "Bank".to_string(),
            amount: MinorUnits::new(100_001),
            date: date(),
            narration: None,
        }];
        let view = render_ledger_view(&pairs);
        assert_eq!(view, vec!["Office Expenses Dr 1000.01  To Bank 1000.01"]);
    }
}
