//! Funds-hold persistence and headroom prefetch.
//!
//! Pure headroom arithmetic lives in `bahi_core::funds`; this module
//! supplies its inputs (balances, facilities, active hold totals) and
//! manages the hold rows themselves.

use std::collections::BTreeMap;

use bahi_core::funds::{self, Facility};
use bahi_shared::error::AppResult;
use bahi_shared::types::{AccountId, HoldId, MinorUnits, PreviewId, TenantId};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set, Statement};

use crate::entities::credit_facilities;
use crate::entities::funds_holds;
use crate::map_db_err;

use super::account;

/// Sum of active (unreleased, unexpired) holds on (account, date).
///
/// # Errors
///
/// Returns an error if the aggregate query fails.
pub async fn active_holds_total<C: ConnectionTrait>(
    db: &C,
    tenant: TenantId,
    account_id: AccountId,
    date: NaiveDate,
    now: DateTime<Utc>,
) -> AppResult<MinorUnits> {
    let stmt = Statement::from_sql_and_values(
        db.get_database_backend(),
        r"SELECT COALESCE(SUM(amount_minor), 0)::BIGINT AS held
          FROM funds_holds
          WHERE tenant_id = $1
            AND account_id = $2
            AND hold_date = $3
            AND released_at IS NULL
            AND expires_at > $4",
        [
            tenant.into_inner().into(),
            account_id.into_inner().into(),
            date.into(),
            now.into(),
        ],
    );

    let row = db.query_one(stmt).await.map_err(map_db_err)?;
    let held: i64 = match row {
        Some(row) => row.try_get("", "held").map_err(map_db_err)?,
        None => 0,
    };
    Ok(MinorUnits::new(held))
}

/// The active credit facility on an account, if any.
///
/// # Errors
///
/// Returns an error if the lookup fails.
pub async fn facility_for<C: ConnectionTrait>(
    db: &C,
    tenant: TenantId,
    account_id: AccountId,
) -> AppResult<Option<Facility>> {
    let row = credit_facilities::Entity::find()
        .filter(credit_facilities::Column::TenantId.eq(tenant.into_inner()))
        .filter(credit_facilities::Column::AccountId.eq(account_id.into_inner()))
        .filter(credit_facilities::Column::IsActive.eq(true))
        .one(db)
        .await
        .map_err(map_db_err)?;

    Ok(row.map(|f| Facility {
        kind: f.kind.into(),
        limit: MinorUnits::new(f.limit_minor),
        outstanding: MinorUnits::new(f.outstanding_minor),
    }))
}

/// Available headroom for an account on a date: running balance, facility
/// extension, minus active holds.
///
/// # Errors
///
/// Returns an error if any of the underlying queries fail.
pub async fn available_headroom<C: ConnectionTrait>(
    db: &C,
    tenant: TenantId,
    account_id: AccountId,
    date: NaiveDate,
    now: DateTime<Utc>,
) -> AppResult<MinorUnits> {
    let balance = account::balance_as_of(db, tenant, account_id, date).await?;
    let facility = facility_for(db, tenant, account_id).await?;
    let holds = active_holds_total(db, tenant, account_id, date, now).await?;
    Ok(funds::available_headroom(balance, facility, holds))
}

/// Creates one hold per (account, date) outflow for a preview.
///
/// # Errors
///
/// Returns an error if an insert fails.
pub async fn create_holds<C: ConnectionTrait>(
    db: &C,
    tenant: TenantId,
    preview_id: PreviewId,
    outflows: &BTreeMap<(AccountId, NaiveDate), MinorUnits>,
    expires_at: DateTime<Utc>,
) -> AppResult<Vec<HoldId>> {
    let now = Utc::now();
    let mut ids = Vec::with_capacity(outflows.len());
    for ((account_id, date), amount) in outflows {
        let id = HoldId::new();
        let row = funds_holds::ActiveModel {
            id: Set(id.into_inner()),
            tenant_id: Set(tenant.into_inner()),
            preview_id: Set(preview_id.into_inner()),
            account_id: Set(account_id.into_inner()),
            hold_date: Set(*date),
            amount_minor: Set(amount.into_inner()),
            released_at: Set(None),
            expires_at: Set(expires_at.into()),
            created_at: Set(now.into()),
        };
        row.insert(db).await.map_err(map_db_err)?;
        ids.push(id);
    }
    Ok(ids)
}

/// Releases every unreleased hold belonging to a preview. Returns the count.
///
/// # Errors
///
/// Returns an error if the update fails.
pub async fn release_holds<C: ConnectionTrait>(
    db: &C,
    preview_id: PreviewId,
    now: DateTime<Utc>,
) -> AppResult<u64> {
    let stmt = Statement::from_sql_and_values(
        db.get_database_backend(),
        r"UPDATE funds_holds
          SET released_at = $2
          WHERE preview_id = $1 AND released_at IS NULL",
        [preview_id.into_inner().into(), now.into()],
    );
    let result = db.execute(stmt).await.map_err(map_db_err)?;
    Ok(result.rows_affected())
}

/// Releases every hold past its expiry, tenant-wide. Returns the count.
///
/// Expired holds already stop counting against headroom; releasing them is
/// housekeeping that keeps the active-holds partial index small.
///
/// # Errors
///
/// Returns an error if the update fails.
pub async fn release_expired<C: ConnectionTrait>(db: &C, now: DateTime<Utc>) -> AppResult<u64> {
    let stmt = Statement::from_sql_and_values(
        db.get_database_backend(),
        r"UPDATE funds_holds
          SET released_at = $1
          WHERE released_at IS NULL AND expires_at <= $1",
        [now.into()],
    );
    let result = db.execute(stmt).await.map_err(map_db_err)?;
    Ok(result.rows_affected())
}
