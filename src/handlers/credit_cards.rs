use axum::{
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::Json,
};
use axum_valid::{Valid, ValidRejection, ValidationRejection};
use common::{CardMovementsResponse, SummaryResponse};
use compute::ComputeError;
use tracing::{debug, error, info, instrument, trace, warn};

use crate::helpers::identity::CurrentUser;
use crate::helpers::query::{QueryError, parse_cycle_date, parse_filter};
use crate::schemas::{ApiError, ApiResponse, AppState, ErrorResponse, MovementsQuery, SummaryQuery};

fn invalid_query(e: QueryError) -> ApiError {
    warn!("Rejecting query: {}", e);
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new(e.to_string(), "INVALID_QUERY")),
    )
}

fn rejected_query(rejection: ValidRejection<QueryRejection>) -> ApiError {
    let reason = match rejection {
        ValidationRejection::Valid(errors) => errors.to_string(),
        ValidationRejection::Inner(rejection) => rejection.body_text(),
    };
    invalid_query(QueryError::Malformed(reason))
}

fn rejected_path(rejection: PathRejection) -> ApiError {
    invalid_query(QueryError::Malformed(rejection.body_text()))
}

fn compute_error(e: ComputeError) -> ApiError {
    match e {
        ComputeError::NotAuthorized => (
            StatusCode::FORBIDDEN,
            Json(ErrorResponse::new("Not authorized to access this credit card", "NOT_AUTHORIZED")),
        ),
        ComputeError::NotFound(what) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(format!("{} not found", what), "NOT_FOUND")),
        ),
        ComputeError::Database(e) => {
            error!("Database error while computing credit card data: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to load credit card data", "DATABASE_ERROR")),
            )
        }
    }
}

/// Summary of the household's credit cards for the billing cycle around `cycle_date`
#[utoipa::path(
    get,
    path = "/api/v1/credit-cards/summary",
    tag = "credit-cards",
    params(
        SummaryQuery,
        ("X-User-Id" = i32, Header, description = "Id of the authenticated user")
    ),
    responses(
        (status = 200, description = "Credit card summary computed successfully", body = ApiResponse<SummaryResponse>),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 401, description = "Missing user identity", body = ErrorResponse),
        (status = 404, description = "User has no household", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_credit_card_summary(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    query: Result<Valid<Query<SummaryQuery>>, ValidRejection<QueryRejection>>,
) -> Result<Json<ApiResponse<SummaryResponse>>, ApiError> {
    trace!("Entering get_credit_card_summary function");

    let Valid(Query(query)) = query.map_err(rejected_query)?;

    let cycle_date = parse_cycle_date(query.cycle_date.as_deref()).map_err(invalid_query)?;
    let filter = parse_filter(query.card_ids.as_deref(), query.owner_ids.as_deref()).map_err(invalid_query)?;
    debug!(
        "Computing summary for user {} at {} with filter {:?}",
        user_id, cycle_date, filter
    );

    let summary = compute::get_summary(&state.db, user_id, &cycle_date, filter.as_ref())
        .await
        .map_err(compute_error)?;

    info!(
        "Credit card summary for user {}: {} cards, total debt {}",
        user_id,
        summary.cards.len(),
        summary.totals.total_debt
    );

    Ok(Json(ApiResponse {
        data: summary,
        message: "Credit card summary computed successfully".to_string(),
        success: true,
    }))
}

/// Charges and payments of one credit card for the billing cycle around `cycle_date`
#[utoipa::path(
    get,
    path = "/api/v1/credit-cards/{card_id}/movements",
    tag = "credit-cards",
    params(
        ("card_id" = i32, Path, description = "Credit card id"),
        MovementsQuery,
        ("X-User-Id" = i32, Header, description = "Id of the authenticated user")
    ),
    responses(
        (status = 200, description = "Card movements retrieved successfully", body = ApiResponse<CardMovementsResponse>),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 401, description = "Missing user identity", body = ErrorResponse),
        (status = 403, description = "Card belongs to another household", body = ErrorResponse),
        (status = 404, description = "Credit card not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_card_movements(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    card_id: Result<Path<i32>, PathRejection>,
    query: Result<Valid<Query<MovementsQuery>>, ValidRejection<QueryRejection>>,
) -> Result<Json<ApiResponse<CardMovementsResponse>>, ApiError> {
    trace!("Entering get_card_movements function");

    let Path(card_id) = card_id.map_err(rejected_path)?;
    let Valid(Query(query)) = query.map_err(rejected_query)?;

    let cycle_date = parse_cycle_date(query.cycle_date.as_deref()).map_err(invalid_query)?;
    debug!("Fetching movements of card {} for user {} at {}", card_id, user_id, cycle_date);

    let movements = compute::get_card_movements(&state.db, user_id, card_id, &cycle_date)
        .await
        .map_err(compute_error)?;

    info!(
        "Card {} has {} charges and {} payments in cycle {}",
        card_id,
        movements.charges.movements.len(),
        movements.payments.items.len(),
        movements.billing_cycle.label
    );

    Ok(Json(ApiResponse {
        data: movements,
        message: "Card movements retrieved successfully".to_string(),
        success: true,
    }))
}
