use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::credits::ledger::refund_quietly;
use crate::credits::DOCUMENT_GENERATION_COST;
use crate::documents::generator::draft_documents;
use crate::documents::storage::{
    document_key, object_url, upload_markdown, COVER_LETTER_FILE, RESUME_FILE,
};
use crate::errors::AppError;
use crate::jobs::get_posting;
use crate::models::jobs::{GeneratedDocumentRow, JobPostingRow};
use crate::profile::repository::load_profile_or_empty;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateDocumentsRequest {
    pub user_id: Uuid,
    pub job_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct GenerateDocumentsResponse {
    pub document_id: Uuid,
    pub job_id: Uuid,
    pub resume_url: String,
    pub cover_letter_url: String,
    pub credits_used: i32,
    pub remaining_credits: i32,
}

/// POST /api/v1/documents
///
/// Unknown jobs are rejected before any credits move. Every failure after
/// the deduction refunds it.
pub async fn handle_generate_documents(
    State(state): State<AppState>,
    Json(req): Json<GenerateDocumentsRequest>,
) -> Result<Json<GenerateDocumentsResponse>, AppError> {
    let posting = get_posting(&state.db, req.job_id).await?;

    let balance = state
        .credits
        .deduct(req.user_id, DOCUMENT_GENERATION_COST)
        .await?;

    match generate_and_store(&state, req.user_id, &posting).await {
        Ok(row) => {
            info!(
                "Generated documents {} for user {} / job {}",
                row.id, req.user_id, req.job_id
            );
            Ok(Json(GenerateDocumentsResponse {
                document_id: row.id,
                job_id: row.job_posting_id,
                resume_url: row.resume_url,
                cover_letter_url: row.cover_letter_url,
                credits_used: row.credits_used,
                remaining_credits: balance.remaining(),
            }))
        }
        Err(e) => {
            refund_quietly(state.credits.as_ref(), req.user_id, DOCUMENT_GENERATION_COST).await;
            Err(e)
        }
    }
}

async fn generate_and_store(
    state: &AppState,
    user_id: Uuid,
    posting: &JobPostingRow,
) -> Result<GeneratedDocumentRow, AppError> {
    let profile = load_profile_or_empty(&state.db, user_id).await?;

    let drafted = draft_documents(&state.llm, &profile, posting).await?;

    let document_id = Uuid::new_v4();
    let bucket = &state.config.s3_bucket;
    let resume_key = document_key(user_id, document_id, RESUME_FILE);
    let cover_key = document_key(user_id, document_id, COVER_LETTER_FILE);

    upload_markdown(&state.s3, bucket, &resume_key, drafted.resume_markdown).await?;
    upload_markdown(&state.s3, bucket, &cover_key, drafted.cover_letter_markdown).await?;

    let endpoint = &state.config.s3_endpoint;
    let row = sqlx::query_as::<_, GeneratedDocumentRow>(
        r#"
        INSERT INTO generated_documents
            (id, user_id, job_posting_id, resume_url, cover_letter_url, credits_used)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(document_id)
    .bind(user_id)
    .bind(posting.id)
    .bind(object_url(endpoint, bucket, &resume_key))
    .bind(object_url(endpoint, bucket, &cover_key))
    .bind(DOCUMENT_GENERATION_COST)
    .fetch_one(&state.db)
    .await?;

    Ok(row)
}

pub async fn count_documents(pool: &sqlx::PgPool, user_id: Uuid) -> Result<i64, AppError> {
    Ok(
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM generated_documents WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await?,
    )
}
