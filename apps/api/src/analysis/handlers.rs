use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::advisory::report::{required_skill_union, skill_gaps};
use crate::analysis::history::{insert_analysis, list_analyses, NewAnalysis};
use crate::catalog::load_career_paths;
use crate::errors::AppError;
use crate::jobs::{fetch_recent_postings, SCAN_WINDOW};
use crate::matching::categorizer::{is_graduated, partition_roles, CategorizedRole};
use crate::matching::jobs::{suggest_jobs, ScoredJob};
use crate::matching::scorer::{rank_career_paths, MatchWeights};
use crate::models::analysis::AnalysisResultRow;
use crate::profile::repository::load_profile_or_empty;
use crate::routes::normalize_limit;
use crate::state::AppState;

/// Jobs attached to each analysis.
const SUGGESTED_JOB_LIMIT: usize = 5;

#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    pub user_id: Uuid,
    pub industry: String,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub analysis_id: Uuid,
    pub industry: String,
    pub graduated: bool,
    pub immediate_roles: Vec<CategorizedRole>,
    pub future_roles: Vec<CategorizedRole>,
    pub skill_gaps: Vec<String>,
    pub suggested_jobs: Vec<ScoredJob>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisListQuery {
    pub user_id: Uuid,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// POST /api/v1/analyses
pub async fn handle_run_analysis(
    State(state): State<AppState>,
    Json(req): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let industry = req.industry.trim().to_string();
    if industry.is_empty() {
        return Err(AppError::Validation("industry cannot be empty".to_string()));
    }

    let profile = load_profile_or_empty(&state.db, req.user_id).await?;
    let paths = load_career_paths(
        &state.db,
        &state.redis,
        state.config.catalog_cache_ttl_secs,
        &industry,
    )
    .await?;

    let gaps = skill_gaps(&required_skill_union(&paths), profile.all_skills());
    let graduated = is_graduated(&profile);
    let ranked = rank_career_paths(paths, &profile, &MatchWeights::default());
    let (immediate_roles, future_roles) = partition_roles(ranked, graduated);

    let postings = fetch_recent_postings(&state.db, SCAN_WINDOW).await?;
    let suggested_jobs = suggest_jobs(postings, &profile, &immediate_roles, SUGGESTED_JOB_LIMIT);
    let suggested_ids: Vec<String> = suggested_jobs
        .iter()
        .map(|j| j.posting.id.to_string())
        .collect();

    let matched_roles = json!({
        "immediate_roles": immediate_roles,
        "future_roles": future_roles,
    });
    let row = insert_analysis(
        &state.db,
        NewAnalysis {
            user_id: req.user_id,
            industry: &industry,
            matched_roles: &matched_roles,
            skill_gaps: &gaps,
            suggested_jobs: &suggested_ids,
        },
    )
    .await?;

    info!(
        "Analysis {} for user {} in '{}': {} immediate, {} future, {} gaps",
        row.id,
        req.user_id,
        industry,
        immediate_roles.len(),
        future_roles.len(),
        gaps.len()
    );

    Ok(Json(AnalysisResponse {
        analysis_id: row.id,
        industry,
        graduated,
        immediate_roles,
        future_roles,
        skill_gaps: gaps,
        suggested_jobs,
        created_at: row.created_at,
    }))
}

/// GET /api/v1/analyses
///
/// Previous analyses, newest first, paginated by `limit` / `offset`.
pub async fn handle_list_analyses(
    State(state): State<AppState>,
    Query(params): Query<AnalysisListQuery>,
) -> Result<Json<Vec<AnalysisResultRow>>, AppError> {
    let limit = normalize_limit(params.limit, 10, 50);
    let offset = params.offset.unwrap_or(0).max(0);
    let rows = list_analyses(&state.db, params.user_id, limit, offset).await?;
    Ok(Json(rows))
}
