use chrono::{NaiveDate, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::pipeline::PipelineTaskRow;
use crate::pipeline::{default_checklist, TaskStatus};

/// Advisory lock key for one user's pipeline. Folds the UUID into 64 bits.
pub fn pipeline_lock_key(user_id: Uuid) -> i64 {
    let bits = user_id.as_u128();
    ((bits >> 64) as u64 ^ bits as u64) as i64
}

/// Serialises writers of one user's pipeline until the transaction ends.
/// Seeding and step_order assignment both read-then-write, so they run under it.
async fn lock_user_pipeline(tx: &mut Transaction<'_, Postgres>, user_id: Uuid) -> Result<(), AppError> {
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(pipeline_lock_key(user_id))
        .execute(&mut **tx)
        .await?;
    Ok(())
}

pub async fn fetch_tasks(pool: &PgPool, user_id: Uuid) -> Result<Vec<PipelineTaskRow>, AppError> {
    Ok(sqlx::query_as::<_, PipelineTaskRow>(
        "SELECT * FROM pipeline_tasks WHERE user_id = $1 ORDER BY step_order, created_at",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}

/// Tasks ordered by step; a user with none gets the default checklist first.
pub async fn list_or_seed_tasks(pool: &PgPool, user_id: Uuid) -> Result<Vec<PipelineTaskRow>, AppError> {
    let tasks = fetch_tasks(pool, user_id).await?;
    if !tasks.is_empty() {
        return Ok(tasks);
    }

    let mut tx = pool.begin().await?;
    lock_user_pipeline(&mut tx, user_id).await?;

    // A concurrent first request may have seeded while we waited on the lock.
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pipeline_tasks WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

    if existing == 0 {
        for seed in default_checklist(Utc::now().date_naive()) {
            sqlx::query(
                r#"
                INSERT INTO pipeline_tasks (id, user_id, step_order, title, description, status, due_date)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(user_id)
            .bind(seed.step_order)
            .bind(seed.title)
            .bind(seed.description)
            .bind(TaskStatus::Pending)
            .bind(seed.due_date)
            .execute(&mut *tx)
            .await?;
        }
        info!("Seeded default pipeline for user {}", user_id);
    }
    tx.commit().await?;

    fetch_tasks(pool, user_id).await
}

pub struct NewTask<'a> {
    pub user_id: Uuid,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub due_date: Option<NaiveDate>,
    pub link_url: Option<&'a str>,
}

/// Appends a pending task after the user's last step.
pub async fn create_task(pool: &PgPool, task: NewTask<'_>) -> Result<PipelineTaskRow, AppError> {
    let mut tx = pool.begin().await?;
    lock_user_pipeline(&mut tx, task.user_id).await?;

    let row = sqlx::query_as::<_, PipelineTaskRow>(
        r#"
        INSERT INTO pipeline_tasks (id, user_id, step_order, title, description, status, due_date, link_url)
        SELECT $1, $2, COALESCE(MAX(step_order), 0) + 1, $3, $4, $5, $6, $7
        FROM pipeline_tasks WHERE user_id = $2
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(task.user_id)
    .bind(task.title)
    .bind(task.description)
    .bind(TaskStatus::Pending)
    .bind(task.due_date)
    .bind(task.link_url)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(row)
}

pub async fn update_task_status(
    pool: &PgPool,
    user_id: Uuid,
    task_id: Uuid,
    status: TaskStatus,
) -> Result<PipelineTaskRow, AppError> {
    sqlx::query_as::<_, PipelineTaskRow>(
        r#"
        UPDATE pipeline_tasks SET status = $3, updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(task_id)
    .bind(user_id)
    .bind(status)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Pipeline task {task_id} not found")))
}
