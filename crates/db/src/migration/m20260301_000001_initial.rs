//! Initial database migration.
//!
//! Creates the enums, tables, and unique indexes for the posting pipeline.
//! The schema is versioned here and only here; repositories assume exactly
//! this shape.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(ENUMS_SQL).await?;
        db.execute_unprepared(CHART_OF_ACCOUNTS_SQL).await?;
        db.execute_unprepared(CREDIT_FACILITIES_SQL).await?;
        db.execute_unprepared(SERIES_COUNTERS_SQL).await?;
        db.execute_unprepared(SERIES_RESERVATIONS_SQL).await?;
        db.execute_unprepared(PREVIEW_SNAPSHOTS_SQL).await?;
        db.execute_unprepared(FUNDS_HOLDS_SQL).await?;
        db.execute_unprepared(DOCUMENTS_SQL).await?;
        db.execute_unprepared(LEDGER_PAIRS_SQL).await?;
        db.execute_unprepared(IDEMPOTENCY_KEYS_SQL).await?;
        db.execute_unprepared(PERIOD_LOCKS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
CREATE TYPE document_type AS ENUM (
    'invoice',
    'receipt',
    'payment_voucher',
    'contra_voucher',
    'journal'
);

CREATE TYPE account_kind AS ENUM (
    'asset',
    'liability',
    'equity',
    'income',
    'expense'
);

CREATE TYPE account_class AS ENUM (
    'cash',
    'bank',
    'tds',
    'gst',
    'regular'
);

CREATE TYPE reservation_status AS ENUM (
    'held',
    'used',
    'expired'
);

CREATE TYPE snapshot_status AS ENUM (
    'active',
    'used'
);

CREATE TYPE facility_kind AS ENUM (
    'od',
    'occ',
    'loan'
);
";

const CHART_OF_ACCOUNTS_SQL: &str = r"
-- tenant_id NULL = shared global tier; tenant rows shadow global rows.
CREATE TABLE chart_of_accounts (
    id UUID PRIMARY KEY,
    tenant_id UUID,
    name TEXT NOT NULL,
    kind account_kind NOT NULL,
    class account_class NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE UNIQUE INDEX idx_coa_tenant_name
    ON chart_of_accounts (tenant_id, name) WHERE tenant_id IS NOT NULL;
CREATE UNIQUE INDEX idx_coa_global_name
    ON chart_of_accounts (name) WHERE tenant_id IS NULL;
";

const CREDIT_FACILITIES_SQL: &str = r"
CREATE TABLE credit_facilities (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL,
    account_id UUID NOT NULL REFERENCES chart_of_accounts(id),
    kind facility_kind NOT NULL,
    limit_minor BIGINT NOT NULL CHECK (limit_minor >= 0),
    outstanding_minor BIGINT NOT NULL DEFAULT 0 CHECK (outstanding_minor >= 0),
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    UNIQUE (tenant_id, account_id)
);
";

const SERIES_COUNTERS_SQL: &str = r"
-- last_value only ever increases; gaps in issued numbers are acceptable.
CREATE TABLE series_counters (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL,
    doc_type document_type NOT NULL,
    fiscal_year INTEGER NOT NULL,
    last_value BIGINT NOT NULL DEFAULT 0,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    UNIQUE (tenant_id, doc_type, fiscal_year)
);
";

const SERIES_RESERVATIONS_SQL: &str = r"
-- The unique number tuple is the anti-collision invariant.
CREATE TABLE series_reservations (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL,
    doc_type document_type NOT NULL,
    fiscal_year INTEGER NOT NULL,
    number TEXT NOT NULL,
    status reservation_status NOT NULL DEFAULT 'held',
    expires_at TIMESTAMPTZ NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    UNIQUE (tenant_id, doc_type, fiscal_year, number)
);

CREATE INDEX idx_reservations_expiry
    ON series_reservations (expires_at) WHERE status = 'held';
";

const PREVIEW_SNAPSHOTS_SQL: &str = r"
CREATE TABLE preview_snapshots (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL,
    doc_type document_type NOT NULL,
    content_hash CHAR(64) NOT NULL,
    payload JSONB NOT NULL,
    status snapshot_status NOT NULL DEFAULT 'active',
    reservation_id UUID REFERENCES series_reservations(id),
    expires_at TIMESTAMPTZ NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_snapshots_tenant ON preview_snapshots (tenant_id);
";

const FUNDS_HOLDS_SQL: &str = r"
CREATE TABLE funds_holds (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL,
    preview_id UUID NOT NULL REFERENCES preview_snapshots(id) ON DELETE CASCADE,
    account_id UUID NOT NULL REFERENCES chart_of_accounts(id),
    hold_date DATE NOT NULL,
    amount_minor BIGINT NOT NULL CHECK (amount_minor > 0),
    released_at TIMESTAMPTZ,
    expires_at TIMESTAMPTZ NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_holds_active
    ON funds_holds (tenant_id, account_id, hold_date) WHERE released_at IS NULL;
CREATE INDEX idx_holds_preview ON funds_holds (preview_id);
";

const DOCUMENTS_SQL: &str = r"
CREATE TABLE documents (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL,
    doc_type document_type NOT NULL,
    fiscal_year INTEGER NOT NULL,
    number TEXT NOT NULL,
    doc_date DATE NOT NULL,
    reference TEXT,
    model JSONB NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    UNIQUE (tenant_id, doc_type, fiscal_year, number)
);

CREATE INDEX idx_documents_reference
    ON documents (tenant_id, reference) WHERE reference IS NOT NULL;
";

const LEDGER_PAIRS_SQL: &str = r"
-- Permanent ledger. Append-only; rows are never updated or deleted.
CREATE TABLE ledger_pairs (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL,
    document_id UUID REFERENCES documents(id),
    document_number TEXT NOT NULL,
    debit_account_id UUID NOT NULL REFERENCES chart_of_accounts(id),
    credit_account_id UUID NOT NULL REFERENCES chart_of_accounts(id),
    amount_minor BIGINT NOT NULL CHECK (amount_minor > 0),
    entry_date DATE NOT NULL,
    narration TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_pairs_tenant_date ON ledger_pairs (tenant_id, entry_date);
CREATE INDEX idx_pairs_debit ON ledger_pairs (tenant_id, debit_account_id, entry_date);
CREATE INDEX idx_pairs_credit ON ledger_pairs (tenant_id, credit_account_id, entry_date);
";

const IDEMPOTENCY_KEYS_SQL: &str = r"
CREATE TABLE idempotency_keys (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL,
    key TEXT NOT NULL,
    document_id UUID REFERENCES documents(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    UNIQUE (tenant_id, key)
);
";

const PERIOD_LOCKS_SQL: &str = r"
CREATE TABLE period_locks (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL UNIQUE,
    locked_through DATE NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS period_locks;
DROP TABLE IF EXISTS idempotency_keys;
DROP TABLE IF EXISTS ledger_pairs;
DROP TABLE IF EXISTS documents;
DROP TABLE IF EXISTS funds_holds;
DROP TABLE IF EXISTS preview_snapshots;
DROP TABLE IF EXISTS series_reservations;
DROP TABLE IF EXISTS series_counters;
DROP TABLE IF EXISTS credit_facilities;
DROP TABLE IF EXISTS chart_of_accounts;

DROP TYPE IF EXISTS facility_kind;
DROP TYPE IF EXISTS snapshot_status;
DROP TYPE IF EXISTS reservation_status;
DROP TYPE IF EXISTS account_class;
DROP TYPE IF EXISTS account_kind;
DROP TYPE IF EXISTS document_type;
";
