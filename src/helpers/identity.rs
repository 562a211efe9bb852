//! Caller identity forwarded by the session layer in front of the service.

use axum::{
    Json, async_trait,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use tracing::warn;

use crate::schemas::{ApiError, ErrorResponse};

/// Header carrying the authenticated user id
pub const USER_ID_HEADER: &str = "x-user-id";

/// Id of the authenticated user making the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<i32>().ok())
            .filter(|id| *id > 0);

        match user_id {
            Some(user_id) => Ok(CurrentUser(user_id)),
            None => {
                warn!("Rejecting request without a valid {} header", USER_ID_HEADER);
                Err((
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorResponse::new("Missing or invalid user identity", "UNAUTHORIZED")),
                ))
            }
        }
    }
}
