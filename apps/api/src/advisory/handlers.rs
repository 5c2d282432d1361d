use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::advisory::report::{assemble_report, AdvisoryReport};
use crate::catalog::load_catalog_for_industries;
use crate::credits::ledger::refund_quietly;
use crate::credits::ADVISORY_REPORT_COST;
use crate::errors::AppError;
use crate::models::analysis::AdvisoryReportRow;
use crate::profile::repository::load_profile_or_empty;
use crate::routes::UserIdQuery;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateReportRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct AdvisoryReportResponse {
    pub report_id: Uuid,
    pub industries: Vec<String>,
    #[serde(flatten)]
    pub report: AdvisoryReport,
    pub credits_used: i32,
    pub remaining_credits: i32,
    pub created_at: DateTime<Utc>,
}

/// POST /api/v1/reports
///
/// Paid operation: deducts the report cost up front, refunds it if the
/// report cannot be built or stored.
pub async fn handle_generate_report(
    State(state): State<AppState>,
    Json(req): Json<GenerateReportRequest>,
) -> Result<Json<AdvisoryReportResponse>, AppError> {
    let balance = state.credits.deduct(req.user_id, ADVISORY_REPORT_COST).await?;

    match build_and_store_report(&state, req.user_id).await {
        Ok((row, report)) => {
            info!("Stored advisory report {} for user {}", row.id, req.user_id);
            Ok(Json(AdvisoryReportResponse {
                report_id: row.id,
                industries: row.industries,
                report,
                credits_used: row.credits_used,
                remaining_credits: balance.remaining(),
                created_at: row.created_at,
            }))
        }
        Err(e) => {
            refund_quietly(state.credits.as_ref(), req.user_id, ADVISORY_REPORT_COST).await;
            Err(e)
        }
    }
}

async fn build_and_store_report(
    state: &AppState,
    user_id: Uuid,
) -> Result<(AdvisoryReportRow, AdvisoryReport), AppError> {
    let profile = load_profile_or_empty(&state.db, user_id).await?;
    let paths = load_catalog_for_industries(
        &state.db,
        &state.redis,
        state.config.catalog_cache_ttl_secs,
        &profile.preferred_industries,
    )
    .await?;

    let report = assemble_report(&profile, &paths);
    let report_data = serde_json::to_value(&report)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize report: {e}")))?;

    let row = sqlx::query_as::<_, AdvisoryReportRow>(
        r#"
        INSERT INTO advisory_reports (id, user_id, industries, report_data, credits_used)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&profile.preferred_industries)
    .bind(&report_data)
    .bind(ADVISORY_REPORT_COST)
    .fetch_one(&state.db)
    .await?;

    Ok((row, report))
}

/// GET /api/v1/reports/latest
///
/// Most recent stored report, or `null` when the user has none yet.
pub async fn handle_latest_report(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Option<AdvisoryReportRow>>, AppError> {
    let row = latest_report(&state.db, params.user_id).await?;
    Ok(Json(row))
}

pub async fn latest_report(
    pool: &sqlx::PgPool,
    user_id: Uuid,
) -> Result<Option<AdvisoryReportRow>, AppError> {
    Ok(sqlx::query_as::<_, AdvisoryReportRow>(
        "SELECT * FROM advisory_reports WHERE user_id = $1 ORDER BY created_at DESC LIMIT 1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?)
}

pub async fn count_reports(pool: &sqlx::PgPool, user_id: Uuid) -> Result<i64, AppError> {
    Ok(
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM advisory_reports WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await?,
    )
}
