//! Periodic expiry sweep.
//!
//! Abandoned previews need no explicit cancel: the sweep expires their
//! HELD reservations, releases their stale holds, and deletes their
//! expired snapshots, so numbers and headroom are never locked
//! indefinitely. The confirm path rejects expired snapshots on its own;
//! deletion here only keeps the table from accumulating dead rows.

use bahi_shared::error::AppResult;
use chrono::Utc;
use sea_orm::DatabaseConnection;

use super::{funds, series, snapshot};

/// Counts from one sweep pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepStats {
    /// HELD reservations transitioned to EXPIRED.
    pub reservations_expired: u64,
    /// Stale holds released.
    pub holds_released: u64,
    /// Expired ACTIVE snapshots deleted (their holds cascade).
    pub snapshots_deleted: u64,
}

/// Runs expiry sweeps.
#[derive(Debug, Clone)]
pub struct SweepService {
    db: DatabaseConnection,
}

impl SweepService {
    /// Creates the service.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// One sweep pass over all tenants.
    ///
    /// # Errors
    ///
    /// Returns an error if either sweep update fails.
    pub async fn run_once(&self) -> AppResult<SweepStats> {
        let now = Utc::now();
        let reservations_expired = series::expire_stale(&self.db, now).await?;
        let holds_released = funds::release_expired(&self.db, now).await?;
        let snapshots_deleted = snapshot::delete_expired(&self.db, now).await?;

        if reservations_expired > 0 || holds_released > 0 || snapshots_deleted > 0 {
            tracing::info!(
                reservations_expired,
                holds_released,
                snapshots_deleted,
                "expiry sweep pass complete"
            );
        }

        Ok(SweepStats {
            reservations_expired,
            holds_released,
            snapshots_deleted,
        })
    }
}
