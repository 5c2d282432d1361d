pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::state::AppState;
use crate::{advisory, analysis, catalog, credits, dashboard, documents, jobs, pipeline, profile};

/// `?user_id=` query shared by the per-user read endpoints.
#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

/// Page size from a query param: `default` when absent, clamped to `1..=max`.
pub fn normalize_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).clamp(1, max)
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/profile",
            get(profile::handlers::handle_get_profile).put(profile::handlers::handle_upsert_profile),
        )
        .route(
            "/api/v1/career-paths",
            get(catalog::handlers::handle_get_career_paths),
        )
        .route(
            "/api/v1/analyses",
            post(analysis::handlers::handle_run_analysis).get(analysis::handlers::handle_list_analyses),
        )
        .route("/api/v1/reports", post(advisory::handlers::handle_generate_report))
        .route(
            "/api/v1/reports/latest",
            get(advisory::handlers::handle_latest_report),
        )
        .route("/api/v1/credits", get(credits::handlers::handle_get_credits))
        .route("/api/v1/jobs", get(jobs::handlers::handle_scan_jobs))
        .route(
            "/api/v1/documents",
            post(documents::handlers::handle_generate_documents),
        )
        .route(
            "/api/v1/pipeline",
            get(pipeline::handlers::handle_list_tasks).post(pipeline::handlers::handle_create_task),
        )
        .route(
            "/api/v1/pipeline/:id",
            patch(pipeline::handlers::handle_update_status),
        )
        .route("/api/v1/dashboard", get(dashboard::handlers::handle_dashboard))
        .with_state(state)
}
