//! Chart-of-accounts lookup, auto-provisioning, and running balances.
//!
//! Resolution is two-tier: tenant rows first, then the shared global tier.
//! Names that resolve nowhere are auto-provisioned as tenant rows with a
//! kind and class inferred from the name.

use std::collections::BTreeMap;

use bahi_core::accounts::{infer_class, infer_kind};
use bahi_core::validation::AccountRef;
use bahi_shared::error::{AppError, AppResult};
use bahi_shared::types::{AccountId, MinorUnits, TenantId};
use chrono::NaiveDate;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QuerySelect, Set, Statement,
};
use uuid::Uuid;

use crate::entities::{chart_of_accounts, documents, period_locks, sea_orm_active_enums};
use crate::map_db_err;

/// Resolves every named account, provisioning tenant rows for unknown names.
///
/// Returns the resolved registry keyed by account name, ready to drop into
/// validation reference data.
///
/// # Errors
///
/// Returns an error if a lookup or insert fails.
pub async fn ensure_accounts<C: ConnectionTrait>(
    db: &C,
    tenant: TenantId,
    names: &[String],
) -> AppResult<BTreeMap<String, AccountRef>> {
    let mut resolved = BTreeMap::new();
    if names.is_empty() {
        return Ok(resolved);
    }

    let tenant_rows = chart_of_accounts::Entity::find()
        .filter(chart_of_accounts::Column::TenantId.eq(tenant.into_inner()))
        .filter(chart_of_accounts::Column::Name.is_in(names.iter().cloned()))
        .all(db)
        .await
        .map_err(map_db_err)?;
    for row in tenant_rows {
        resolved.insert(row.name.clone(), account_ref(&row));
    }

    let missing: Vec<&String> = names.iter().filter(|n| !resolved.contains_key(*n)).collect();
    if !missing.is_empty() {
        let global_rows = chart_of_accounts::Entity::find()
            .filter(chart_of_accounts::Column::TenantId.is_null())
            .filter(chart_of_accounts::Column::Name.is_in(missing.iter().map(|n| n.as_str())))
            .all(db)
            .await
            .map_err(map_db_err)?;
        for row in global_rows {
            resolved.insert(row.name.clone(), account_ref(&row));
        }
    }

    for name in names {
        if resolved.contains_key(name) {
            continue;
        }
        // Two previews can race to provision the same name; DO NOTHING
        // keeps the loser from aborting its open transaction, and the
        // re-select picks up whichever row won.
        let kind = sea_orm_active_enums::AccountKind::from(infer_kind(name));
        let class = sea_orm_active_enums::AccountClass::from(infer_class(name));
        let stmt = Statement::from_sql_and_values(
            db.get_database_backend(),
            r"INSERT INTO chart_of_accounts
                  (id, tenant_id, name, kind, class, is_active, created_at, updated_at)
              VALUES ($1, $2, $3, $4::account_kind, $5::account_class, TRUE, NOW(), NOW())
              ON CONFLICT (tenant_id, name) WHERE tenant_id IS NOT NULL DO NOTHING",
            [
                AccountId::new().into_inner().into(),
                tenant.into_inner().into(),
                name.clone().into(),
                kind.to_value().into(),
                class.to_value().into(),
            ],
        );
        let inserted = db.execute(stmt).await.map_err(map_db_err)?.rows_affected() == 1;

        let row = chart_of_accounts::Entity::find()
            .filter(chart_of_accounts::Column::TenantId.eq(tenant.into_inner()))
            .filter(chart_of_accounts::Column::Name.eq(name.as_str()))
            .one(db)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| {
                AppError::Internal(format!("ledger '{name}' vanished after provisioning"))
            })?;
        if inserted {
            tracing::debug!(account = %name, kind = ?row.kind, "auto-provisioned ledger");
        }
        resolved.insert(name.clone(), account_ref(&row));
    }

    Ok(resolved)
}

/// Takes a row lock on an account for the rest of the transaction.
///
/// Concurrent previews placing holds on the same monitored account must
/// serialize their headroom read against each other's hold inserts;
/// locking the account row gives them a common queue.
///
/// # Errors
///
/// Returns an error if the locking select fails.
pub async fn lock_for_update<C: ConnectionTrait>(db: &C, account_id: AccountId) -> AppResult<()> {
    chart_of_accounts::Entity::find_by_id(account_id.into_inner())
        .lock_exclusive()
        .one(db)
        .await
        .map_err(map_db_err)?;
    Ok(())
}

fn account_ref(row: &chart_of_accounts::Model) -> AccountRef {
    AccountRef {
        id: AccountId::from_uuid(row.id),
        kind: row.kind.into(),
        class: row.class.into(),
        active: row.is_active,
    }
}

/// Running balance of an account as of a date, inclusive.
///
/// Debits minus credits over the permanent ledger; may be negative.
///
/// # Errors
///
/// Returns an error if the aggregate query fails.
pub async fn balance_as_of<C: ConnectionTrait>(
    db: &C,
    tenant: TenantId,
    account_id: AccountId,
    as_of: NaiveDate,
) -> AppResult<MinorUnits> {
    let stmt = Statement::from_sql_and_values(
        db.get_database_backend(),
        r"SELECT (COALESCE(SUM(CASE WHEN debit_account_id = $2 THEN amount_minor ELSE 0 END), 0)
               - COALESCE(SUM(CASE WHEN credit_account_id = $2 THEN amount_minor ELSE 0 END), 0)
               )::BIGINT AS balance
          FROM ledger_pairs
          WHERE tenant_id = $1
            AND (debit_account_id = $2 OR credit_account_id = $2)
            AND entry_date <= $3",
        [
            tenant.into_inner().into(),
            account_id.into_inner().into(),
            as_of.into(),
        ],
    );

    let row = db.query_one(stmt).await.map_err(map_db_err)?;
    let balance: i64 = match row {
        Some(row) => row.try_get("", "balance").map_err(map_db_err)?,
        None => 0,
    };
    Ok(MinorUnits::new(balance))
}

/// True when a posted document with this external reference already exists.
///
/// # Errors
///
/// Returns an error if the lookup fails.
pub async fn reference_exists<C: ConnectionTrait>(
    db: &C,
    tenant: TenantId,
    reference: &str,
) -> AppResult<bool> {
    let found = documents::Entity::find()
        .filter(documents::Column::TenantId.eq(tenant.into_inner()))
        .filter(documents::Column::Reference.eq(reference))
        .one(db)
        .await
        .map_err(map_db_err)?;
    Ok(found.is_some())
}

/// The tenant's period-lock cutoff, if one is set.
///
/// # Errors
///
/// Returns an error if the lookup fails.
pub async fn locked_through<C: ConnectionTrait>(
    db: &C,
    tenant: TenantId,
) -> AppResult<Option<NaiveDate>> {
    let lock = period_locks::Entity::find()
        .filter(period_locks::Column::TenantId.eq(tenant.into_inner()))
        .one(db)
        .await
        .map_err(map_db_err)?;
    Ok(lock.map(|l| l.locked_through))
}

/// Sets or moves the tenant's period-lock cutoff.
///
/// # Errors
///
/// Returns an error if the write fails.
pub async fn set_locked_through<C: ConnectionTrait>(
    db: &C,
    tenant: TenantId,
    cutoff: NaiveDate,
) -> AppResult<()> {
    let now = chrono::Utc::now();
    let existing = period_locks::Entity::find()
        .filter(period_locks::Column::TenantId.eq(tenant.into_inner()))
        .one(db)
        .await
        .map_err(map_db_err)?;

    match existing {
        Some(lock) => {
            let mut active: period_locks::ActiveModel = lock.into();
            active.locked_through = Set(cutoff);
            active.updated_at = Set(now.into());
            active.update(db).await.map_err(map_db_err)?;
        }
        None => {
            let row = period_locks::ActiveModel {
                id: Set(Uuid::now_v7()),
                tenant_id: Set(tenant.into_inner()),
                locked_through: Set(cutoff),
                created_at: Set(now.into()),
                updated_at: Set(now.into()),
            };
            row.insert(db).await.map_err(map_db_err)?;
        }
    }
    Ok(())
}

/// Deactivates an account. Accounts are never hard-deleted.
///
/// # Errors
///
/// Returns an error if the account does not exist or the write fails.
pub async fn deactivate<C: ConnectionTrait>(
    db: &C,
    tenant: TenantId,
    account_id: AccountId,
) -> AppResult<()> {
    let account = chart_of_accounts::Entity::find_by_id(account_id.into_inner())
        .filter(chart_of_accounts::Column::TenantId.eq(tenant.into_inner()))
        .one(db)
        .await
        .map_err(map_db_err)?
        .ok_or_else(|| AppError::NotFound(format!("account {account_id}")))?;

    let mut active: chart_of_accounts::ActiveModel = account.into();
    active.is_active = Set(false);
    active.updated_at = Set(chrono::Utc::now().into());
    active.update(db).await.map_err(map_db_err)?;
    Ok(())
}
