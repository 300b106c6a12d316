//! `SeaORM` entity for the preview_snapshots table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{DocType, SnapshotStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "preview_snapshots")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub doc_type: DocType,
    pub content_hash: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub payload: Json,
    pub status: SnapshotStatus,
    pub reservation_id: Option<Uuid>,
    pub expires_at: DateTimeWithTimeZone,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::series_reservations::Entity",
        from = "Column::ReservationId",
        to = "super::series_reservations::Column::Id"
    )]
    SeriesReservations,
    #[sea_orm(has_many = "super::funds_holds::Entity")]
    FundsHolds,
}

impl Related<super::series_reservations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SeriesReservations.def()
    }
}

impl Related<super::funds_holds::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FundsHolds.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
