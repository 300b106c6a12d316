//! Document number reservation.
//!
//! The counter increment is a single atomic upsert (`ON CONFLICT ... DO
//! UPDATE ... RETURNING`), so two concurrent callers can never read the
//! same value. The reservation insert then lands the number under the
//! unique (tenant, doc_type, fiscal_year, number) index; a conflict there
//! (crash-recovery replay) restarts the whole cycle.

use bahi_core::document::DocumentType;
use bahi_core::numbering::{self, ReservationStatus, MAX_RESERVE_ATTEMPTS};
use bahi_shared::error::{AppError, AppResult};
use bahi_shared::types::{ReservationId, TenantId};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveEnum, ConnectionTrait, EntityTrait, Statement};
use uuid::Uuid;

use crate::entities::{sea_orm_active_enums, series_reservations};
use crate::map_db_err;

/// A freshly drawn HELD reservation.
#[derive(Debug, Clone)]
pub struct Reservation {
    /// Reservation ID.
    pub id: ReservationId,
    /// The issued document number.
    pub number: String,
    /// When the sweep may expire it.
    pub expires_at: DateTime<Utc>,
}

/// Draws the next number for (tenant, doc_type, fiscal_year) and inserts a
/// HELD reservation for it.
///
/// # Errors
///
/// Returns `ServiceUnavailable` when the attempt cap is exhausted; callers
/// may retry the whole request. Never returns a duplicate number.
pub async fn reserve_next<C: ConnectionTrait>(
    db: &C,
    tenant: TenantId,
    doc_type: DocumentType,
    fiscal_year: i32,
    expires_at: DateTime<Utc>,
) -> AppResult<Reservation> {
    for attempt in 1..=MAX_RESERVE_ATTEMPTS {
        let sequence = increment_counter(db, tenant, doc_type, fiscal_year).await?;
        let number = numbering::format_number(doc_type, fiscal_year, sequence);

        // ON CONFLICT DO NOTHING so a taken number never aborts the
        // caller's open transaction; zero rows affected means redraw.
        let id = ReservationId::new();
        let stmt = Statement::from_sql_and_values(
            db.get_database_backend(),
            r"INSERT INTO series_reservations
                  (id, tenant_id, doc_type, fiscal_year, number, status,
                   expires_at, created_at, updated_at)
              VALUES ($1, $2, $3::document_type, $4, $5, 'held', $6, NOW(), NOW())
              ON CONFLICT (tenant_id, doc_type, fiscal_year, number) DO NOTHING",
            [
                id.into_inner().into(),
                tenant.into_inner().into(),
                doc_type.to_string().into(),
                fiscal_year.into(),
                number.clone().into(),
                expires_at.into(),
            ],
        );

        let result = db.execute(stmt).await.map_err(map_db_err)?;
        if result.rows_affected() == 1 {
            return Ok(Reservation {
                id,
                number,
                expires_at,
            });
        }
        tracing::warn!(
            %number,
            attempt,
            "reservation number already taken, redrawing"
        );
    }

    Err(AppError::ServiceUnavailable(format!(
        "could not reserve a {doc_type} number after {MAX_RESERVE_ATTEMPTS} attempts"
    )))
}

async fn increment_counter<C: ConnectionTrait>(
    db: &C,
    tenant: TenantId,
    doc_type: DocumentType,
    fiscal_year: i32,
) -> AppResult<i64> {
    let stmt = Statement::from_sql_and_values(
        db.get_database_backend(),
        r"INSERT INTO series_counters (id, tenant_id, doc_type, fiscal_year, last_value, updated_at)
          VALUES ($1, $2, $3::document_type, $4, 1, NOW())
          ON CONFLICT (tenant_id, doc_type, fiscal_year)
          DO UPDATE SET last_value = series_counters.last_value + 1, updated_at = NOW()
          RETURNING last_value",
        [
            Uuid::now_v7().into(),
            tenant.into_inner().into(),
            doc_type.to_string().into(),
            fiscal_year.into(),
        ],
    );

    let row = db
        .query_one(stmt)
        .await
        .map_err(map_db_err)?
        .ok_or_else(|| AppError::Internal("counter upsert returned no row".to_string()))?;
    row.try_get("", "last_value").map_err(map_db_err)
}

/// Transitions a reservation HELD→USED.
///
/// Must only be called inside the same transaction that writes the
/// permanent ledger rows.
///
/// # Errors
///
/// Returns `Conflict` when the reservation is not HELD, `NotFound` when it
/// does not exist.
pub async fn finalize<C: ConnectionTrait>(db: &C, id: ReservationId) -> AppResult<String> {
    transition(db, id, ReservationStatus::Used).await
}

/// Transitions a reservation HELD→EXPIRED (explicit cancel).
///
/// # Errors
///
/// Returns `Conflict` when the reservation is not HELD, `NotFound` when it
/// does not exist.
pub async fn cancel<C: ConnectionTrait>(db: &C, id: ReservationId) -> AppResult<String> {
    transition(db, id, ReservationStatus::Expired).await
}

async fn transition<C: ConnectionTrait>(
    db: &C,
    id: ReservationId,
    to: ReservationStatus,
) -> AppResult<String> {
    // Guarded update: only a HELD row moves, so a finalize racing the
    // sweep can never overwrite a terminal status.
    let to_value = sea_orm_active_enums::ReservationStatus::from(to).to_value();
    let stmt = Statement::from_sql_and_values(
        db.get_database_backend(),
        r"UPDATE series_reservations
          SET status = $2::reservation_status, updated_at = NOW()
          WHERE id = $1 AND status = 'held'
          RETURNING number",
        [id.into_inner().into(), to_value.into()],
    );
    if let Some(row) = db.query_one(stmt).await.map_err(map_db_err)? {
        return row.try_get("", "number").map_err(map_db_err);
    }

    let reservation = series_reservations::Entity::find_by_id(id.into_inner())
        .one(db)
        .await
        .map_err(map_db_err)?
        .ok_or_else(|| AppError::NotFound(format!("reservation {id}")))?;

    let current: ReservationStatus = reservation.status.into();
    match current.transition_to(to) {
        Err(e) => Err(AppError::Conflict(e.to_string())),
        Ok(_) => Err(AppError::Conflict(format!(
            "reservation {id} changed state concurrently"
        ))),
    }
}

/// Expires every HELD reservation past its expiry. Returns the count.
///
/// The counter is never rolled back; the numbers are burned.
///
/// # Errors
///
/// Returns an error if the update fails.
pub async fn expire_stale<C: ConnectionTrait>(db: &C, now: DateTime<Utc>) -> AppResult<u64> {
    let stmt = Statement::from_sql_and_values(
        db.get_database_backend(),
        r"UPDATE series_reservations
          SET status = 'expired', updated_at = NOW()
          WHERE status = 'held' AND expires_at < $1",
        [now.into()],
    );
    let result = db.execute(stmt).await.map_err(map_db_err)?;
    Ok(result.rows_affected())
}
