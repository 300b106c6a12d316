//! Database-level enums mirroring the core domain enums.
//!
//! Conversions to and from the `bahi-core` types are provided so the
//! repositories never match on database enum values directly.

use bahi_core::accounts::{AccountClass as CoreClass, AccountKind as CoreKind};
use bahi_core::document::DocumentType;
use bahi_core::funds::FacilityKind as CoreFacilityKind;
use bahi_core::numbering::ReservationStatus as CoreReservationStatus;
use bahi_core::snapshot::SnapshotStatus as CoreSnapshotStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// `document_type` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "document_type")]
pub enum DocType {
    /// Sales invoice.
    #[sea_orm(string_value = "invoice")]
    Invoice,
    /// Receipt.
    #[sea_orm(string_value = "receipt")]
    Receipt,
    /// Payment voucher.
    #[sea_orm(string_value = "payment_voucher")]
    PaymentVoucher,
    /// Contra voucher.
    #[sea_orm(string_value = "contra_voucher")]
    ContraVoucher,
    /// General journal.
    #[sea_orm(string_value = "journal")]
    Journal,
}

impl From<DocumentType> for DocType {
    fn from(value: DocumentType) -> Self {
        match value {
            DocumentType::Invoice => Self::Invoice,
            DocumentType::Receipt => Self::Receipt,
            DocumentType::PaymentVoucher => Self::PaymentVoucher,
            DocumentType::ContraVoucher => Self::ContraVoucher,
            DocumentType::Journal => Self::Journal,
        }
    }
}

impl From<DocType> for DocumentType {
    fn from(value: DocType) -> Self {
        match value {
            DocType::Invoice => Self::Invoice,
            DocType::Receipt => Self::Receipt,
            DocType::PaymentVoucher => Self::PaymentVoucher,
            DocType::ContraVoucher => Self::ContraVoucher,
            DocType::Journal => Self::Journal,
        }
    }
}

/// `account_kind` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_kind")]
pub enum AccountKind {
    /// Asset.
    #[sea_orm(string_value = "asset")]
    Asset,
    /// Liability.
    #[sea_orm(string_value = "liability")]
    Liability,
    /// Equity.
    #[sea_orm(string_value = "equity")]
    Equity,
    /// Income.
    #[sea_orm(string_value = "income")]
    Income,
    /// Expense.
    #[sea_orm(string_value = "expense")]
    Expense,
}

impl From<CoreKind> for AccountKind {
    fn from(value: CoreKind) -> Self {
        match value {
            CoreKind::Asset => Self::Asset,
            CoreKind::Liability => Self::Liability,
            CoreKind::Equity => Self::Equity,
            CoreKind::Income => Self::Income,
            CoreKind::Expense => Self::Expense,
        }
    }
}

impl From<AccountKind> for CoreKind {
    fn from(value: AccountKind) -> Self {
        match value {
            AccountKind::Asset => Self::Asset,
            AccountKind::Liability => Self::Liability,
            AccountKind::Equity => Self::Equity,
            AccountKind::Income => Self::Income,
            AccountKind::Expense => Self::Expense,
        }
    }
}

/// `account_class` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_class")]
pub enum AccountClass {
    /// Physical cash.
    #[sea_orm(string_value = "cash")]
    Cash,
    /// Bank account.
    #[sea_orm(string_value = "bank")]
    Bank,
    /// TDS ledger.
    #[sea_orm(string_value = "tds")]
    Tds,
    /// GST ledger.
    #[sea_orm(string_value = "gst")]
    Gst,
    /// Everything else.
    #[sea_orm(string_value = "regular")]
    Regular,
}

impl From<CoreClass> for AccountClass {
    fn from(value: CoreClass) -> Self {
        match value {
            CoreClass::Cash => Self::Cash,
            CoreClass::Bank => Self::Bank,
            CoreClass::Tds => Self::Tds,
            CoreClass::Gst => Self::Gst,
            CoreClass::Regular => Self::Regular,
        }
    }
}

impl From<AccountClass> for CoreClass {
    fn from(value: AccountClass) -> Self {
        match value {
            AccountClass::Cash => Self::Cash,
            AccountClass::Bank => Self::Bank,
            AccountClass::Tds => Self::Tds,
            AccountClass::Gst => Self::Gst,
            AccountClass::Regular => Self::Regular,
        }
    }
}

/// `reservation_status` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "reservation_status")]
pub enum ReservationStatus {
    /// Drawn, awaiting commit or expiry.
    #[sea_orm(string_value = "held")]
    Held,
    /// Consumed by a commit.
    #[sea_orm(string_value = "used")]
    Used,
    /// Timed out or cancelled.
    #[sea_orm(string_value = "expired")]
    Expired,
}

impl From<CoreReservationStatus> for ReservationStatus {
    fn from(value: CoreReservationStatus) -> Self {
        match value {
            CoreReservationStatus::Held => Self::Held,
            CoreReservationStatus::Used => Self::Used,
            CoreReservationStatus::Expired => Self::Expired,
        }
    }
}

impl From<ReservationStatus> for CoreReservationStatus {
    fn from(value: ReservationStatus) -> Self {
        match value {
            ReservationStatus::Held => Self::Held,
            ReservationStatus::Used => Self::Used,
            ReservationStatus::Expired => Self::Expired,
        }
    }
}

/// `snapshot_status` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "snapshot_status")]
pub enum SnapshotStatus {
    /// Confirmable until expiry.
    #[sea_orm(string_value = "active")]
    Active,
    /// Consumed by a commit.
    #[sea_orm(string_value = "used")]
    Used,
}

impl From<CoreSnapshotStatus> for SnapshotStatus {
    fn from(value: CoreSnapshotStatus) -> Self {
        match value {
            CoreSnapshotStatus::Active => Self::Active,
            CoreSnapshotStatus::Used => Self::Used,
        }
    }
}

impl From<SnapshotStatus> for CoreSnapshotStatus {
    fn from(value: SnapshotStatus) -> Self {
        match value {
            SnapshotStatus::Active => Self::Active,
            SnapshotStatus::Used => Self::Used,
        }
    }
}

/// `facility_kind` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "facility_kind")]
pub enum FacilityKind {
    /// Overdraft.
    #[sea_orm(string_value = "od")]
    Od,
    /// Open cash credit.
    #[sea_orm(string_value = "occ")]
    Occ,
    /// Term loan.
    #[sea_orm(string_value = "loan")]
    Loan,
}

impl From<CoreFacilityKind> for FacilityKind {
    fn from(value: CoreFacilityKind) -> Self {
        match value {
            CoreFacilityKind::Od => Self::Od,
            CoreFacilityKind::Occ => Self::Occ,
            CoreFacilityKind::Loan => Self::Loan,
        }
    }
}

impl From<FacilityKind> for CoreFacilityKind {
    fn from(value: FacilityKind) -> Self {
        match value {
            FacilityKind::Od => Self::Od,
            FacilityKind::Occ => Self::Occ,
            FacilityKind::Loan => Self::Loan,
        }
    }
}
