pub mod handlers;

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::jobs::JobPostingRow;

/// How many of the newest postings a scan considers.
pub const SCAN_WINDOW: i64 = 200;

/// Newest postings first.
pub async fn fetch_recent_postings(pool: &PgPool, window: i64) -> Result<Vec<JobPostingRow>, AppError> {
    Ok(sqlx::query_as::<_, JobPostingRow>(
        r#"
        SELECT *
        FROM job_postings
        ORDER BY posted_on DESC NULLS LAST, created_at DESC
        LIMIT $1
        "#,
    )
    .bind(window)
    .fetch_all(pool)
    .await?)
}

pub async fn get_posting(pool: &PgPool, job_id: Uuid) -> Result<JobPostingRow, AppError> {
    sqlx::query_as::<_, JobPostingRow>("SELECT * FROM job_postings WHERE id = $1")
        .bind(job_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job posting {job_id} not found")))
}
