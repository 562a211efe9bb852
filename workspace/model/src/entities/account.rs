use super::{household, user};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

/// The kind of account
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum AccountType {
    #[sea_orm(string_value = "savings")]
    Savings,
    #[sea_orm(string_value = "cash")]
    Cash,
    #[sea_orm(string_value = "checking")]
    Checking,
    #[sea_orm(string_value = "investment")]
    Investment,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Savings => "savings",
            AccountType::Cash => "cash",
            AccountType::Checking => "checking",
            AccountType::Investment => "investment",
        }
    }

    /// Savings and cash accounts are the ones that count as money available to pay cards.
    pub fn holds_available_cash(&self) -> bool {
        matches!(self, AccountType::Savings | AccountType::Cash)
    }
}

/// Represents a money account of the household, like a savings account or a cash wallet.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub household_id: i32,
    /// The user who owns this account.
    pub owner_id: i32,
    pub name: String,
    pub account_type: AccountType,
    /// Balance the account had when it started being tracked.
    #[sea_orm(column_type = "Decimal(Some((16, 4)))", nullable)]
    pub initial_balance: Option<Decimal>,
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
    /// An account belongs to one owner.
    #[sea_orm(
        belongs_to = "user::Entity",
        from = "Column::OwnerId",
        to = "user::Column::Id"
    )]
    Owner,
}

impl Related<household::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Household.def()
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
