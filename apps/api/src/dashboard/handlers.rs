use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::advisory::handlers::{count_reports, latest_report};
use crate::analysis::history::latest_analysis;
use crate::credits::ledger::CreditBalance;
use crate::dashboard::{analysis_counts, AnalysisCounts};
use crate::documents::handlers::count_documents;
use crate::errors::AppError;
use crate::pipeline::pipeline_progress;
use crate::pipeline::repository::fetch_tasks;
use crate::profile::completeness::compute_profile_completeness;
use crate::profile::repository::load_profile_or_empty;
use crate::routes::UserIdQuery;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub credits: CreditBalance,
    pub remaining_credits: i32,
    pub profile_completeness: f64,
    /// `None` until the user runs a first analysis.
    pub latest_analysis: Option<AnalysisCounts>,
    pub latest_report_at: Option<DateTime<Utc>>,
    pub total_reports_generated: i64,
    pub total_documents_generated: i64,
    pub pipeline_progress: u8,
}

/// GET /api/v1/dashboard
///
/// Read-only: never seeds the pipeline or creates a ledger row.
pub async fn handle_dashboard(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<DashboardSummary>, AppError> {
    let user_id = params.user_id;

    let (credits, profile, analysis, report, reports, documents, tasks) = tokio::try_join!(
        state.credits.balance(user_id),
        load_profile_or_empty(&state.db, user_id),
        latest_analysis(&state.db, user_id),
        latest_report(&state.db, user_id),
        count_reports(&state.db, user_id),
        count_documents(&state.db, user_id),
        fetch_tasks(&state.db, user_id),
    )?;

    Ok(Json(DashboardSummary {
        remaining_credits: credits.remaining(),
        credits,
        profile_completeness: compute_profile_completeness(&profile).overall_score,
        latest_analysis: analysis.as_ref().map(analysis_counts),
        latest_report_at: report.map(|r| r.created_at),
        total_reports_generated: reports,
        total_documents_generated: documents,
        pipeline_progress: pipeline_progress(&tasks),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_exposes_generation_totals() {
        let summary = DashboardSummary {
            credits: CreditBalance {
                total_credits: 30,
                used_credits: 15,
            },
            remaining_credits: 15,
            profile_completeness: 0.5,
            latest_analysis: None,
            latest_report_at: None,
            total_reports_generated: 1,
            total_documents_generated: 1,
            pipeline_progress: 25,
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["total_reports_generated"], 1);
        assert_eq!(json["total_documents_generated"], 1);
        assert_eq!(json["credits"]["used_credits"], 15);
        assert!(json["latest_analysis"].is_null());
    }
}
