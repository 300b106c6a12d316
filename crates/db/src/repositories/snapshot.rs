//! Preview snapshot persistence and the confirm-time integrity contract.

use bahi_core::snapshot::{PreviewPayload, SnapshotStatus};
use bahi_shared::error::{AppError, AppResult};
use bahi_shared::types::{PreviewId, ReservationId, TenantId};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, QuerySelect, Set};

use crate::entities::preview_snapshots;
use crate::map_db_err;

/// Persists an ACTIVE snapshot and returns its ID and content hash.
///
/// # Errors
///
/// Returns an error if the payload cannot be serialized or the insert fails.
pub async fn create<C: ConnectionTrait>(
    db: &C,
    tenant: TenantId,
    payload: &PreviewPayload,
    reservation_id: ReservationId,
    expires_at: DateTime<Utc>,
) -> AppResult<(PreviewId, String)> {
    let hash = payload
        .hash()
        .map_err(|e| AppError::Internal(format!("payload hash: {e}")))?;
    let value = serde_json::to_value(payload)
        .map_err(|e| AppError::Internal(format!("payload serialize: {e}")))?;

    let id = PreviewId::new();
    let now = Utc::now();
    let row = preview_snapshots::ActiveModel {
        id: Set(id.into_inner()),
        tenant_id: Set(tenant.into_inner()),
        doc_type: Set(payload.doc_type.into()),
        content_hash: Set(hash.clone()),
        payload: Set(value),
        status: Set(SnapshotStatus::Active.into()),
        reservation_id: Set(Some(reservation_id.into_inner())),
        expires_at: Set(expires_at.into()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };
    row.insert(db).await.map_err(map_db_err)?;
    Ok((id, hash))
}

/// Fetches a snapshot by ID, scoped to the tenant.
///
/// # Errors
///
/// Returns an error if the lookup fails.
pub async fn get<C: ConnectionTrait>(
    db: &C,
    tenant: TenantId,
    id: PreviewId,
) -> AppResult<Option<preview_snapshots::Model>> {
    let snapshot = preview_snapshots::Entity::find_by_id(id.into_inner())
        .one(db)
        .await
        .map_err(map_db_err)?;
    Ok(snapshot.filter(|s| s.tenant_id == tenant.into_inner()))
}

/// Fetches a snapshot with a row lock, serializing concurrent confirms.
///
/// # Errors
///
/// Returns `NotFound` when no snapshot exists for the tenant.
pub async fn get_locked<C: ConnectionTrait>(
    db: &C,
    tenant: TenantId,
    id: PreviewId,
) -> AppResult<preview_snapshots::Model> {
    let snapshot = preview_snapshots::Entity::find_by_id(id.into_inner())
        .lock_exclusive()
        .one(db)
        .await
        .map_err(map_db_err)?
        .filter(|s| s.tenant_id == tenant.into_inner());
    snapshot.ok_or_else(|| AppError::NotFound(format!("preview {id}")))
}

/// Verifies the confirm-time integrity contract against a fetched snapshot.
///
/// Distinct failures so clients can tell "re-preview" from "already
/// posted": a hash mismatch or an expired snapshot is a `Conflict`, a USED
/// snapshot is `Gone`.
///
/// # Errors
///
/// See above; additionally `Internal` if the stored payload fails to
/// deserialize.
pub fn verify(
    snapshot: &preview_snapshots::Model,
    expected_hash: &str,
    now: DateTime<Utc>,
) -> AppResult<PreviewPayload> {
    let status: SnapshotStatus = snapshot.status.into();
    if status == SnapshotStatus::Used {
        return Err(AppError::Gone(
            "preview already posted, do not retry".to_string(),
        ));
    }
    if snapshot.content_hash != expected_hash {
        return Err(AppError::Conflict(
            "preview content changed since staging, re-preview required".to_string(),
        ));
    }
    if snapshot.expires_at < now {
        return Err(AppError::Conflict(
            "preview expired, re-preview required".to_string(),
        ));
    }
    serde_json::from_value(snapshot.payload.clone())
        .map_err(|e| AppError::Internal(format!("snapshot payload decode: {e}")))
}

/// Transitions a snapshot ACTIVE→USED.
///
/// # Errors
///
/// Returns `Gone` when the snapshot was already consumed.
pub async fn mark_used<C: ConnectionTrait>(
    db: &C,
    snapshot: preview_snapshots::Model,
) -> AppResult<()> {
    let current: SnapshotStatus = snapshot.status.into();
    current
        .transition_to(SnapshotStatus::Used)
        .map_err(|e| AppError::Gone(e.to_string()))?;

    let mut active: preview_snapshots::ActiveModel = snapshot.into();
    active.status = Set(SnapshotStatus::Used.into());
    active.updated_at = Set(Utc::now().into());
    active.update(db).await.map_err(map_db_err)?;
    Ok(())
}

/// Deletes ACTIVE snapshots past their expiry. Returns the count.
///
/// USED snapshots are kept; they document what was posted. The confirm
/// path rejects expired snapshots on its own, so deletion here is pure
/// housekeeping.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub async fn delete_expired<C: ConnectionTrait>(db: &C, now: DateTime<Utc>) -> AppResult<u64> {
    let stmt = sea_orm::Statement::from_sql_and_values(
        db.get_database_backend(),
        r"DELETE FROM preview_snapshots
          WHERE status = 'active' AND expires_at < $1",
        [now.into()],
    );
    let result = db.execute(stmt).await.map_err(map_db_err)?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bahi_core::document::{DocumentModel, DocumentType};
    use chrono::NaiveDate;

    fn snapshot_row(status: SnapshotStatus, hash: &str) -> preview_snapshots::Model {
        let payload = PreviewPayload {
            doc_type: DocumentType::Journal,
            number: "JV-2025-00001".to_string(),
            model: DocumentModel::bare(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()),
            lines: Vec::new(),
            pairs: Vec::new(),
        };
        let now = Utc::now();
        preview_snapshots::Model {
            id: PreviewId::new().into_inner(),
            tenant_id: TenantId::new().into_inner(),
            doc_type: payload.doc_type.into(),
            content_hash: hash.to_string(),
            payload: serde_json::to_value(&payload).unwrap(),
            status: status.into(),
            reservation_id: None,
            expires_at: (now + chrono::Duration::minutes(15)).into(),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn real_hash() -> String {
        let payload = PreviewPayload {
            doc_type: DocumentType::Journal,
            number: "JV-2025-00001".to_string(),
            model: DocumentModel::bare(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()),
            lines: Vec::new(),
            pairs: Vec::new(),
        };
        payload.hash().unwrap()
    }

    #[test]
    fn test_verify_accepts_matching_hash() {
        let hash = real_hash();
        let row = snapshot_row(SnapshotStatus::Active, &hash);
        assert!(verify(&row, &hash, Utc::now()).is_ok());
    }

    #[test]
    fn test_verify_hash_mismatch_is_conflict() {
        let row = snapshot_row(SnapshotStatus::Active, &real_hash());
        let err = verify(&row, "deadbeef", Utc::now()).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn test_verify_used_is_gone_even_with_wrong_hash() {
        let row = snapshot_row(SnapshotStatus::Used, &real_hash());
        let err = verify(&row, "deadbeef", Utc::now()).unwrap_err();
        assert!(matches!(err, AppError::Gone(_)));
    }

    #[test]
    fn test_verify_expired_is_conflict() {
        let hash = real_hash();
        let mut row = snapshot_row(SnapshotStatus::Active, &hash);
        row.expires_at = (Utc::now() - chrono::Duration::minutes(1)).into();
        let err = verify(&row, &hash, Utc::now()).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }
}
