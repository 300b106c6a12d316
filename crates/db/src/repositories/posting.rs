//! The commit orchestrator.
//!
//! Confirm runs entirely inside one transaction: verify the snapshot,
//! release this preview's holds, record the idempotency key, insert the
//! document row, insert every pair, finalize the reservation, mark the
//! snapshot USED. Any failure rolls the whole thing back. Document
//! rendering is best-effort and happens strictly after commit.

use std::sync::Arc;

use bahi_core::fiscal;
use bahi_core::snapshot::PreviewPayload;
use bahi_shared::error::{AppError, AppResult};
use bahi_shared::types::{DocumentId, PairId, PreviewId, ReservationId, TenantId};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set, Statement, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{documents, idempotency_keys, ledger_pairs};
use crate::map_db_err;

use super::{account, funds, series, snapshot};

/// Renders a human-readable document file for a posted document.
///
/// Implementations live outside this crate (PDF/HTML generators). Failures
/// are reported but never affect the committed posting.
pub trait DocumentRenderer: Send + Sync {
    /// Renders the document. Called after the commit transaction.
    ///
    /// # Errors
    ///
    /// Implementation-defined; errors are logged and swallowed.
    fn render(&self, document: &documents::Model) -> Result<(), Box<dyn std::error::Error>>;
}

/// A confirm call against a staged preview.
#[derive(Debug, Clone)]
pub struct ConfirmRequest {
    /// Owning tenant.
    pub tenant: TenantId,
    /// The staged preview to post.
    pub preview_id: PreviewId,
    /// Hash the client previewed; must match the stored snapshot exactly.
    pub expected_hash: String,
    /// Client idempotency key. Duplicate keys make confirm a no-op.
    pub idempotency_key: Option<String>,
}

/// Result of a successful (or idempotently repeated) confirm.
#[derive(Debug, Clone)]
pub struct PostedReceipt {
    /// Number the posting was stamped with.
    pub number: String,
    /// Count of permanent pairs written.
    pub pairs_posted: usize,
    /// Document metadata row, for types that carry one.
    pub document: Option<documents::Model>,
    /// True when this key was already posted and nothing was written now.
    pub already_posted: bool,
}

/// Posts staged previews to the permanent ledger, exactly once.
#[derive(Clone)]
pub struct PostingService {
    db: DatabaseConnection,
    renderer: Option<Arc<dyn DocumentRenderer>>,
}

impl PostingService {
    /// Creates the service without a renderer.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db, renderer: None }
    }

    /// Attaches a post-commit document renderer.
    #[must_use]
    pub fn with_renderer(mut self, renderer: Arc<dyn DocumentRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Confirms a staged preview.
    ///
    /// # Errors
    ///
    /// `Conflict` on hash mismatch or expired preview, `Gone` when the
    /// preview was already posted, `NotFound` for an unknown preview.
    pub async fn confirm(&self, request: ConfirmRequest) -> AppResult<PostedReceipt> {
        let txn = self.db.begin().await.map_err(map_db_err)?;
        let now = Utc::now();

        // (1) Hash-validate under a row lock so concurrent confirms of the
        // same preview serialize.
        let row = snapshot::get_locked(&txn, request.tenant, request.preview_id).await?;
        let reservation_id = row.reservation_id.map(ReservationId::from_uuid);
        let payload = snapshot::verify(&row, &request.expected_hash, now)?;

        // (2) Holds hand off to the real posting inside this transaction.
        funds::release_holds(&txn, request.preview_id, now).await?;

        // (3) Duplicate keys are a no-op, not an error.
        if let Some(key) = request.idempotency_key.as_deref() {
            if let Some(prior) =
                record_idempotency_key(&txn, request.tenant, key).await?
            {
                txn.rollback().await.map_err(map_db_err)?;
                tracing::info!(
                    tenant = %request.tenant,
                    key,
                    "duplicate idempotency key, returning prior posting"
                );
                return Ok(PostedReceipt {
                    number: payload.number,
                    pairs_posted: 0,
                    document: prior,
                    already_posted: true,
                });
            }
        }

        // (4) Document metadata row for human-document types.
        let document = if payload.doc_type.has_document_record() {
            Some(insert_document(&txn, request.tenant, &payload).await?)
        } else {
            None
        };
        if let (Some(doc), Some(key)) = (&document, request.idempotency_key.as_deref()) {
            link_idempotency_key(&txn, request.tenant, key, DocumentId::from_uuid(doc.id)).await?;
        }

        // (5) Permanent pairs, stamped with the reserved number.
        let pairs_posted =
            insert_pairs(&txn, request.tenant, &payload, document.as_ref()).await?;

        // (6) + (7) Finalize the number and consume the snapshot.
        if let Some(reservation_id) = reservation_id {
            series::finalize(&txn, reservation_id).await?;
        }
        snapshot::mark_used(&txn, row).await?;

        txn.commit().await.map_err(map_db_err)?;
        tracing::info!(
            tenant = %request.tenant,
            preview = %request.preview_id,
            number = %payload.number,
            pairs_posted,
            "posting committed"
        );

        // Best-effort; an already-committed posting is never rolled back.
        if let (Some(renderer), Some(doc)) = (&self.renderer, &document) {
            if let Err(err) = renderer.render(doc) {
                tracing::warn!(number = %payload.number, error = %err, "document render failed");
            }
        }

        Ok(PostedReceipt {
            number: payload.number,
            pairs_posted,
            document,
            already_posted: false,
        })
    }
}

/// Inserts the key; returns the prior posting's document when the key was
/// already recorded.
async fn record_idempotency_key<C: ConnectionTrait>(
    db: &C,
    tenant: TenantId,
    key: &str,
) -> AppResult<Option<Option<documents::Model>>> {
    // ON CONFLICT DO NOTHING so a duplicate key never aborts the open
    // confirm transaction; zero rows affected means the key is taken.
    let stmt = Statement::from_sql_and_values(
        db.get_database_backend(),
        r"INSERT INTO idempotency_keys (id, tenant_id, key, document_id, created_at)
          VALUES ($1, $2, $3, NULL, $4)
          ON CONFLICT (tenant_id, key) DO NOTHING",
        [
            Uuid::now_v7().into(),
            tenant.into_inner().into(),
            key.into(),
            Utc::now().into(),
        ],
    );
    let result = db.execute(stmt).await.map_err(map_db_err)?;
    if result.rows_affected() == 1 {
        return Ok(None);
    }

    let existing = idempotency_keys::Entity::find()
        .filter(idempotency_keys::Column::TenantId.eq(tenant.into_inner()))
        .filter(idempotency_keys::Column::Key.eq(key))
        .one(db)
        .await
        .map_err(map_db_err)?;
    let document = match existing.and_then(|k| k.document_id) {
        Some(doc_id) => documents::Entity::find_by_id(doc_id)
            .one(db)
            .await
            .map_err(map_db_err)?,
        None => None,
    };
    Ok(Some(document))
}

async fn link_idempotency_key<C: ConnectionTrait>(
    db: &C,
    tenant: TenantId,
    key: &str,
    document_id: DocumentId,
) -> AppResult<()> {
    let existing = idempotency_keys::Entity::find()
        .filter(idempotency_keys::Column::TenantId.eq(tenant.into_inner()))
        .filter(idempotency_keys::Column::Key.eq(key))
        .one(db)
        .await
        .map_err(map_db_err)?
        .ok_or_else(|| AppError::Internal("idempotency key vanished mid-commit".to_string()))?;

    let mut active: idempotency_keys::ActiveModel = existing.into();
    active.document_id = Set(Some(document_id.into_inner()));
    active.update(db).await.map_err(map_db_err)?;
    Ok(())
}

async fn insert_document<C: ConnectionTrait>(
    db: &C,
    tenant: TenantId,
    payload: &PreviewPayload,
) -> AppResult<documents::Model> {
    let model = serde_json::to_value(&payload.model)
        .map_err(|e| AppError::Internal(format!("document model serialize: {e}")))?;
    let row = documents::ActiveModel {
        id: Set(DocumentId::new().into_inner()),
        tenant_id: Set(tenant.into_inner()),
        doc_type: Set(payload.doc_type.into()),
        fiscal_year: Set(fiscal::fiscal_year_for(payload.model.date)),
        number: Set(payload.number.clone()),
        doc_date: Set(payload.model.date),
        reference: Set(payload.model.reference.clone()),
        model: Set(model),
        created_at: Set(Utc::now().into()),
    };
    row.insert(db).await.map_err(map_db_err)
}

async fn insert_pairs<C: ConnectionTrait>(
    db: &C,
    tenant: TenantId,
    payload: &PreviewPayload,
    document: Option<&documents::Model>,
) -> AppResult<usize> {
    let names: Vec<String> = {
        let mut names: Vec<String> = payload
            .pairs
            .iter()
            .flat_map(|p| [p.debit_account.clone(), p.credit_account.clone()])
            .collect();
        names.sort();
        names.dedup();
        names
    };
    let accounts = account::ensure_accounts(db, tenant, &names).await?;

    let now = Utc::now();
    for pair in &payload.pairs {
        // Same-account pairs are rejected at preview; a snapshot carrying
        // one is corrupt.
        if pair.is_self_pair() {
            return Err(AppError::BusinessRule(format!(
                "snapshot contains a self-pair on '{}'",
                pair.debit_account
            )));
        }
        let debit = accounts.get(&pair.debit_account).ok_or_else(|| {
            AppError::Internal(format!("unresolved ledger '{}'", pair.debit_account))
        })?;
        let credit = accounts.get(&pair.credit_account).ok_or_else(|| {
            AppError::Internal(format!("unresolved ledger '{}'", pair.credit_account))
        })?;

        let row = ledger_pairs::ActiveModel {
            id: Set(PairId::new().into_inner()),
            tenant_id: Set(tenant.into_inner()),
            document_id: Set(document.map(|d| d.id)),
            document_number: Set(payload.number.clone()),
            debit_account_id: Set(debit.id.into_inner()),
            credit_account_id: Set(credit.id.into_inner()),
            amount_minor: Set(pair.amount.into_inner()),
            entry_date: Set(pair.date),
            narration: Set(pair.narration.clone()),
            created_at: Set(now.into()),
        };
        row.insert(db).await.map_err(map_db_err)?;
    }

    Ok(payload.pairs.len())
}
