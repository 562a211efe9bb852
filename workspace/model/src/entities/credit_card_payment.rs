use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use super::{account, household, payment_method};

/// A payment made towards a credit card balance, taken from a household account.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "credit_card_payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub household_id: i32,
    pub credit_card_id: i32,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub amount: Decimal,
    pub payment_date: NaiveDate,
    pub notes: Option<String>,
    /// Account the money left from.
    pub source_account_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "household::Entity",
        from = "Column::HouseholdId",
        to = "household::Column::Id",
        on_delete = "Cascade"
    )]
    Household,
    #[sea_orm(
        belongs_to = "payment_method::Entity",
        from = "Column::CreditCardId",
        to = "payment_method::Column::Id",
        on_delete = "Cascade"
    )]
    CreditCard,
    #[sea_orm(
        belongs_to = "account::Entity",
        from = "Column::SourceAccountId",
        to = "account::Column::Id",
        on_delete = "Cascade"
    )]
    SourceAccount,
}

impl Related<payment_method::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CreditCard.def()
    }
}

impl Related<account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SourceAccount.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
