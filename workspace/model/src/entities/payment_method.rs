use super::{account, household, user};
use sea_orm::entity::prelude::*;

/// The type of a payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum PaymentMethodType {
    #[sea_orm(string_value = "credit_card")]
    CreditCard,
    #[sea_orm(string_value = "debit_card")]
    DebitCard,
    #[sea_orm(string_value = "cash")]
    Cash,
    #[sea_orm(string_value = "other")]
    Other,
}

/// A way of paying for a movement: a credit card, a debit card, cash, ...
///
/// Credit cards carry a statement `cutoff_day`; debit cards and cash carry the
/// `linked_account_id` their spending is taken from.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "payment_methods")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub household_id: i32,
    pub owner_id: i32,
    pub name: String,
    pub method_type: PaymentMethodType,
    /// Day of month the credit card statement closes (1-31). `None` means the last day of the month.
    pub cutoff_day: Option<i32>,
    /// Account debited by this payment method (debit cards and cash).
    pub linked_account_id: Option<i32>,
    pub institution: Option<String>,
    pub last4: Option<String>,
    #[sea_orm(default_value = "true")]
    pub is_active: bool,
}

impl Model {
    pub fn is_credit_card(&self) -> bool {
        self.method_type == PaymentMethodType::CreditCard
    }

    /// The cutoff day as a day-of-month, if one is configured.
    pub fn cutoff(&self) -> Option<u32> {
        self.cutoff_day.and_then(|day| u32::try_from(day).ok())
    }
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
        belongs_to = "user::Entity",
        from = "Column::OwnerId",
        to = "user::Column::Id"
    )]
    Owner,
    #[sea_orm(
        belongs_to = "account::Entity",
        from = "Column::LinkedAccountId",
        to = "account::Column::Id",
        on_delete = "SetNull"
    )]
    LinkedAccount,
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

impl Related<account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LinkedAccount.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
