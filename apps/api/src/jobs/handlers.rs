use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::{fetch_recent_postings, SCAN_WINDOW};
use crate::matching::jobs::{scan_jobs, ScoredJob};
use crate::profile::repository::load_profile_or_empty;
use crate::routes::normalize_limit;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct JobScanQuery {
    pub user_id: Uuid,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct JobScanResponse {
    pub jobs: Vec<ScoredJob>,
    pub scanned: usize,
}

/// GET /api/v1/jobs
///
/// Scans recent postings and ranks them by required-skill overlap with the user.
pub async fn handle_scan_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobScanQuery>,
) -> Result<Json<JobScanResponse>, AppError> {
    let limit = normalize_limit(params.limit, 20, 100);
    let profile = load_profile_or_empty(&state.db, params.user_id).await?;
    let postings = fetch_recent_postings(&state.db, SCAN_WINDOW).await?;
    let scanned = postings.len();

    let mut jobs = scan_jobs(postings, &profile);
    jobs.truncate(limit as usize);

    Ok(Json(JobScanResponse { jobs, scanned }))
}
