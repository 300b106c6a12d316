//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions for the posting pipeline
//! - Repository functions scoped to a connection or transaction
//! - The preview, posting, and sweep services
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{PostingService, PreviewService, SweepService};

use bahi_shared::config::DatabaseConfig;
use bahi_shared::error::AppError;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Establishes a pooled connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(&config.url);
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections);
    Database::connect(options).await
}

/// Maps a database error into the application error space.
pub(crate) fn map_db_err(err: DbErr) -> AppError {
    AppError::Database(err.to_string())
}
