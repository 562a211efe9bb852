use crate::BillingCycleDto;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One credit card and its debt for its own billing cycle.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CardSummaryDto {
    pub id: i32,
    pub name: String,
    pub owner_id: i32,
    pub owner_name: String,
    /// `None` means the statement closes on the last day of the month
    pub cutoff_day: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub institution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub last4: Option<String>,
    pub billing_cycle: BillingCycleDto,
    /// Sum of movements paid with this card inside the billing cycle
    #[schema(value_type = String)]
    pub total_charges: Decimal,
    /// Sum of payments made to this card in the calendar month
    #[schema(value_type = String)]
    pub total_payments: Decimal,
    /// `total_charges - total_payments`
    #[schema(value_type = String)]
    pub net_debt: Decimal,
    pub movement_count: usize,
    pub payment_count: usize,
}

/// Computed balance of a savings or cash account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AccountBalanceDto {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: String,
    #[schema(value_type = String)]
    pub balance: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Default)]
pub struct AvailableCashDto {
    #[schema(value_type = String)]
    pub total: Decimal,
    pub accounts: Vec<AccountBalanceDto>,
}

/// Aggregate totals across all summarised cards.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Default)]
pub struct TotalsDto {
    #[schema(value_type = String)]
    pub total_charges: Decimal,
    #[schema(value_type = String)]
    pub total_payments: Decimal,
    #[schema(value_type = String)]
    pub total_debt: Decimal,
}

/// Full response of the credit card summary endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SummaryResponse {
    pub billing_cycle: BillingCycleDto,
    pub cards: Vec<CardSummaryDto>,
    pub totals: TotalsDto,
    pub available_cash: AvailableCashDto,
    /// `available_cash.total >= totals.total_debt`
    pub can_pay_all: bool,
}
