use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::load_career_paths;
use crate::errors::AppError;
use crate::matching::scorer::{rank_career_paths, MatchWeights, ScoredCareerPath};
use crate::profile::repository::load_profile_or_empty;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CareerPathsQuery {
    pub industry: String,
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct CareerPathsResponse {
    pub career_paths: Vec<ScoredCareerPath>,
    pub total_paths: usize,
    pub top_match: Option<ScoredCareerPath>,
}

/// GET /api/v1/career-paths
///
/// Catalog roles for an industry, scored against the user's profile and sorted best-first.
pub async fn handle_get_career_paths(
    State(state): State<AppState>,
    Query(params): Query<CareerPathsQuery>,
) -> Result<Json<CareerPathsResponse>, AppError> {
    if params.industry.trim().is_empty() {
        return Err(AppError::Validation("industry cannot be empty".to_string()));
    }

    let paths = load_career_paths(
        &state.db,
        &state.redis,
        state.config.catalog_cache_ttl_secs,
        &params.industry,
    )
    .await?;
    let profile = load_profile_or_empty(&state.db, params.user_id).await?;

    let career_paths = rank_career_paths(paths, &profile, &MatchWeights::default());
    Ok(Json(CareerPathsResponse {
        total_paths: career_paths.len(),
        top_match: career_paths.first().cloned(),
        career_paths,
    }))
}
