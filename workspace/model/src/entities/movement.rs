use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use super::{category, household, payment_method};

/// How a movement is shared inside the household.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum MovementType {
    #[sea_orm(string_value = "HOUSEHOLD")]
    Household,
    #[sea_orm(string_value = "SPLIT")]
    Split,
    #[sea_orm(string_value = "DEBT_PAYMENT")]
    DebtPayment,
}

impl MovementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::Household => "HOUSEHOLD",
            MovementType::Split => "SPLIT",
            MovementType::DebtPayment => "DEBT_PAYMENT",
        }
    }
}

/// A spending entry of the household ledger.
///
/// The payer is either a household user or an external contact. When the
/// movement was paid with a credit card it counts as a charge on that card.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "movements")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub household_id: i32,
    pub movement_type: MovementType,
    pub description: String,
    /// Full amount of the movement, not the split portion.
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub amount: Decimal,
    pub movement_date: NaiveDate,
    pub category_id: Option<i32>,
    pub payer_user_id: Option<i32>,
    pub payer_contact_id: Option<i32>,
    pub payment_method_id: Option<i32>,
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
        belongs_to = "category::Entity",
        from = "Column::CategoryId",
        to = "category::Column::Id",
        on_delete = "SetNull"
    )]
    Category,
    #[sea_orm(
        belongs_to = "payment_method::Entity",
        from = "Column::PaymentMethodId",
        to = "payment_method::Column::Id",
        on_delete = "SetNull"
    )]
    PaymentMethod,
}

impl Related<category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<payment_method::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PaymentMethod.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
