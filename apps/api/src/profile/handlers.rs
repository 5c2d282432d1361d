use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;

use crate::credits::INITIAL_CREDITS;
use crate::errors::AppError;
use crate::models::profile::UserProfile;
use crate::profile::completeness::{compute_profile_completeness, CompletenessReport};
use crate::profile::intake::{normalize_intake, IntakeRequest};
use crate::profile::repository::{get_profile, upsert_profile};
use crate::routes::UserIdQuery;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ProfileResponse {
    pub profile: UserProfile,
    /// True when nothing is stored yet; `profile` is then the empty default.
    pub is_new_user: bool,
    pub completeness: CompletenessReport,
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ProfileResponse>, AppError> {
    let stored = get_profile(&state.db, params.user_id).await?;
    let is_new_user = stored.is_none();
    let profile = stored.unwrap_or_else(|| UserProfile::empty(params.user_id));
    let completeness = compute_profile_completeness(&profile);

    Ok(Json(ProfileResponse {
        profile,
        is_new_user,
        completeness,
    }))
}

/// PUT /api/v1/profile
///
/// Intake submission and later edits. The first submission also opens the
/// user's credit ledger.
pub async fn handle_upsert_profile(
    State(state): State<AppState>,
    Json(req): Json<IntakeRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = normalize_intake(req)?;
    let saved = upsert_profile(&state.db, &profile).await?;
    state.credits.grant_initial(saved.user_id, INITIAL_CREDITS).await?;

    let completeness = compute_profile_completeness(&saved);
    Ok(Json(ProfileResponse {
        profile: saved,
        is_new_user: false,
        completeness,
    }))
}
