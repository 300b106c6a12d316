//! `SeaORM` entity for the documents table (posted document metadata).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::DocType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub doc_type: DocType,
    pub fiscal_year: i32,
    pub number: String,
    pub doc_date: Date,
    pub reference: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub model: Json,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::ledger_pairs::Entity")]
    LedgerPairs,
}

impl Related<super::ledger_pairs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LedgerPairs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
