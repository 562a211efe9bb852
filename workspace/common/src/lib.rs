//! Common transport-layer types for the credit card endpoints.
//! The compute crate builds these directly and the HTTP layer serialises them
//! unchanged, so the wire shape lives in exactly one place.

mod movements;
mod summary;

pub use movements::{CardInfoDto, CardMovementDto, CardMovementsResponse, CardPaymentDto, ChargesDto, PaymentsDto};
pub use summary::{AccountBalanceDto, AvailableCashDto, CardSummaryDto, SummaryResponse, TotalsDto};

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic API response wrapper used by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}

/// Statement window of a card, as sent over the wire.
///
/// Both bounds keep the offset of the reference date they were computed from.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct BillingCycleDto {
    /// First instant of the cycle (00:00 the day after the previous cutoff)
    #[schema(value_type = String, format = DateTime)]
    pub start_date: DateTime<FixedOffset>,
    /// Last instant of the cycle (23:59:59.999999999 on the cutoff day)
    #[schema(value_type = String, format = DateTime)]
    pub end_date: DateTime<FixedOffset>,
    /// Human readable label, e.g. "Dic 16 - Ene 15"
    pub label: String,
}
