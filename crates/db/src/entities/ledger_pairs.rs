//! `SeaORM` entity for the permanent ledger_pairs table.
//!
//! Amounts are integer minor units; this is the only posting shape ever
//! persisted permanently.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "ledger_pairs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub document_id: Option<Uuid>,
    pub document_number: String,
    pub debit_account_id: Uuid,
    pub credit_account_id: Uuid,
    pub amount_minor: i64,
    pub entry_date: Date,
    pub narration: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::documents::Entity",
        from = "Column::DocumentId",
        to = "super::documents::Column::Id"
    )]
    Documents,
    #[sea_orm(
        belongs_to = "super::chart_of_accounts::Entity",
        from = "Column::DebitAccountId",
        to = "super::chart_of_accounts::Column::Id"
    )]
    DebitAccount,
    #[sea_orm(
        belongs_to = "super::chart_of_accounts::Entity",
        from = "Column::CreditAccountId",
        to = "super::chart_of_accounts::Column::Id"
    )]
    CreditAccount,
}

impl Related<super::documents::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Documents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
