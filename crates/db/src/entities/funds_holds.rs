//! `SeaORM` entity for the funds_holds table.
//!
//! A hold with `released_at` NULL and `expires_at` in the future counts
//! against headroom.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "funds_holds")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub preview_id: Uuid,
    pub account_id: Uuid,
    pub hold_date: Date,
    pub amount_minor: i64,
    pub released_at: Option<DateTimeWithTimeZone>,
    pub expires_at: DateTimeWithTimeZone,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::preview_snapshots::Entity",
        from = "Column::PreviewId",
        to = "super::preview_snapshots::Column::Id"
    )]
    PreviewSnapshots,
    #[sea_orm(
        belongs_to = "super::chart_of_accounts::Entity",
        from = "Column::AccountId",
        to = "super::chart_of_accounts::Column::Id"
    )]
    ChartOfAccounts,
}

impl Related<super::preview_snapshots::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PreviewSnapshots.def()
    }
}

impl Related<super::chart_of_accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChartOfAccounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
