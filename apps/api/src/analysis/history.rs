use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::analysis::AnalysisResultRow;

pub struct NewAnalysis<'a> {
    pub user_id: Uuid,
    pub industry: &'a str,
    pub matched_roles: &'a Value,
    pub skill_gaps: &'a [String],
    pub suggested_jobs: &'a [String],
}

/// Append-only: each analysis run is a new row, never an update.
pub async fn insert_analysis(pool: &PgPool, analysis: NewAnalysis<'_>) -> Result<AnalysisResultRow, AppError> {
    Ok(sqlx::query_as::<_, AnalysisResultRow>(
        r#"
        INSERT INTO analysis_results
            (id, user_id, industry, matched_roles, skill_gaps, suggested_jobs)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(analysis.user_id)
    .bind(analysis.industry)
    .bind(analysis.matched_roles)
    .bind(analysis.skill_gaps)
    .bind(analysis.suggested_jobs)
    .fetch_one(pool)
    .await?)
}

/// Previous analyses, newest first.
pub async fn list_analyses(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<AnalysisResultRow>, AppError> {
    Ok(sqlx::query_as::<_, AnalysisResultRow>(
        r#"
        SELECT *
        FROM analysis_results
        WHERE user_id = $1
        ORDER BY created_at DESC, id DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?)
}

pub async fn latest_analysis(pool: &PgPool, user_id: Uuid) -> Result<Option<AnalysisResultRow>, AppError> {
    Ok(list_analyses(pool, user_id, 1, 0).await?.into_iter().next())
}
