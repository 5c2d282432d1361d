use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::routes::UserIdQuery;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CreditsResponse {
    pub total_credits: i32,
    pub used_credits: i32,
    pub remaining_credits: i32,
}

/// GET /api/v1/credits
pub async fn handle_get_credits(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<CreditsResponse>, AppError> {
    let balance = state.credits.balance(params.user_id).await?;
    Ok(Json(CreditsResponse {
        total_credits: balance.total_credits,
        used_credits: balance.used_credits,
        remaining_credits: balance.remaining(),
    }))
}
