use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::pipeline::PipelineTaskRow;
use crate::pipeline::repository::{create_task, list_or_seed_tasks, update_task_status, NewTask};
use crate::pipeline::{pipeline_progress, TaskStatus};
use crate::routes::UserIdQuery;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PipelineResponse {
    pub tasks: Vec<PipelineTaskRow>,
    pub progress_percent: u8,
}

/// GET /api/v1/pipeline
pub async fn handle_list_tasks(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<PipelineResponse>, AppError> {
    let tasks = list_or_seed_tasks(&state.db, params.user_id).await?;
    let progress_percent = pipeline_progress(&tasks);
    Ok(Json(PipelineResponse {
        tasks,
        progress_percent,
    }))
}

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub link_url: Option<String>,
}

/// POST /api/v1/pipeline
pub async fn handle_create_task(
    State(state): State<AppState>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<Json<PipelineTaskRow>, AppError> {
    let title = req.title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("Task title must not be empty".into()));
    }

    let row = create_task(
        &state.db,
        NewTask {
            user_id: req.user_id,
            title,
            description: req.description.as_deref(),
            due_date: req.due_date,
            link_url: req.link_url.as_deref(),
        },
    )
    .await?;
    Ok(Json(row))
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub user_id: Uuid,
    pub status: TaskStatus,
}

/// PATCH /api/v1/pipeline/:id
pub async fn handle_update_status(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<PipelineTaskRow>, AppError> {
    let row = update_task_status(&state.db, req.user_id, task_id, req.status).await?;
    Ok(Json(row))
}
