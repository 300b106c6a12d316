//! `SeaORM` entity for the chart_of_accounts table.
//!
//! Rows with a NULL tenant belong to the shared global tier; tenant rows
//! shadow global rows of the same name.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{AccountClass, AccountKind};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "chart_of_accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tenant_id: Option<Uuid>,
    pub name: String,
    pub kind: AccountKind,
    pub class: AccountClass,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::funds_holds::Entity")]
    FundsHolds,
    #[sea_orm(has_many = "super::credit_facilities::Entity")]
    CreditFacilities,
}

impl Related<super::funds_holds::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FundsHolds.def()
    }
}

impl Related<super::credit_facilities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CreditFacilities.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
