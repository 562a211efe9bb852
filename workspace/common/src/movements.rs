use crate::BillingCycleDto;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A charge made with a credit card.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CardMovementDto {
    pub id: i32,
    /// HOUSEHOLD, SPLIT or DEBT_PAYMENT
    #[serde(rename = "type")]
    pub movement_type: String,
    pub description: String,
    /// Full amount of the movement, not the split portion
    #[schema(value_type = String)]
    pub amount: Decimal,
    pub movement_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub category_name: Option<String>,
    pub payer_name: String,
}

/// A payment made towards a credit card.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CardPaymentDto {
    pub id: i32,
    #[schema(value_type = String)]
    pub amount: Decimal,
    pub payment_date: NaiveDate,
    pub source_account_name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CardInfoDto {
    pub id: i32,
    pub name: String,
    pub owner_name: String,
    pub cutoff_day: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Default)]
pub struct ChargesDto {
    pub movements: Vec<CardMovementDto>,
    #[schema(value_type = String)]
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Default)]
pub struct PaymentsDto {
    pub items: Vec<CardPaymentDto>,
    #[schema(value_type = String)]
    pub total: Decimal,
}

/// Full response of the card movements endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CardMovementsResponse {
    pub credit_card: CardInfoDto,
    pub billing_cycle: BillingCycleDto,
    pub charges: ChargesDto,
    pub payments: PaymentsDto,
    #[schema(value_type = String)]
    pub net_debt: Decimal,
}
