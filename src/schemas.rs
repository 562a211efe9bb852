use axum::{Json, http::StatusCode};
use common::{
    AccountBalanceDto, AvailableCashDto, BillingCycleDto, CardInfoDto, CardMovementDto,
    CardMovementsResponse, CardPaymentDto, CardSummaryDto, ChargesDto, PaymentsDto, SummaryResponse,
    TotalsDto,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, OpenApi, ToSchema};
use validator::Validate;

pub use common::ApiResponse;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: &str) -> Self {
        Self {
            error: error.into(),
            code: code.to_string(),
            success: false,
        }
    }
}

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// Maximum length of the comma-separated id lists
pub const MAX_ID_LIST_LEN: u64 = 512;

/// Query parameters for the credit card summary
#[derive(Debug, Deserialize, ToSchema, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct SummaryQuery {
    /// Any date inside the wanted billing cycle (YYYY-MM-DD, default: today)
    #[validate(length(max = 10))]
    pub cycle_date: Option<String>,
    /// Only include these credit cards (comma-separated ids)
    #[validate(length(max = MAX_ID_LIST_LEN))]
    pub card_ids: Option<String>,
    /// Only include cards owned by these users (comma-separated ids)
    #[validate(length(max = MAX_ID_LIST_LEN))]
    pub owner_ids: Option<String>,
}

/// Query parameters for the movements of a single credit card
#[derive(Debug, Deserialize, ToSchema, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct MovementsQuery {
    /// Any date inside the wanted billing cycle (YYYY-MM-DD, default: today)
    #[validate(length(max = 10))]
    pub cycle_date: Option<String>,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::credit_cards::get_credit_card_summary,
        crate::handlers::credit_cards::get_card_movements,
    ),
    components(
        schemas(
            ApiResponse<SummaryResponse>,
            ApiResponse<CardMovementsResponse>,
            ErrorResponse,
            HealthResponse,
            SummaryQuery,
            MovementsQuery,
            SummaryResponse,
            CardSummaryDto,
            BillingCycleDto,
            TotalsDto,
            AvailableCashDto,
            AccountBalanceDto,
            CardMovementsResponse,
            CardInfoDto,
            ChargesDto,
            PaymentsDto,
            CardMovementDto,
            CardPaymentDto,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "credit-cards", description = "Credit card billing cycles, debt and available cash"),
    ),
    info(
        title = "cardcycle API",
        description = "Credit card billing cycle and debt reconciliation for households",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
