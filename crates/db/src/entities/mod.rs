//! `SeaORM` entity definitions.

pub mod chart_of_accounts;
pub mod credit_facilities;
pub mod documents;
pub mod funds_holds;
pub mod idempotency_keys;
pub mod ledger_pairs;
pub mod period_locks;
pub mod preview_snapshots;
pub mod sea_orm_active_enums;
pub mod series_counters;
pub mod series_reservations;
