//! `SeaORM` entity for the series_reservations table.
//!
//! The unique (tenant, doc_type, fiscal_year, number) index is the core
//! anti-collision invariant.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{DocType, ReservationStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "series_reservations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub doc_type: DocType,
    pub fiscal_year: i32,
    pub number: String,
    pub status: ReservationStatus,
    pub expires_at: DateTimeWithTimeZone,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::preview_snapshots::Entity")]
    PreviewSnapshots,
}

impl Related<super::preview_snapshots::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PreviewSnapshots.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
