use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// One stored analysis run. Rows are append-only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AnalysisResultRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub industry: String,
    pub matched_roles: Value,
    pub skill_gaps: Vec<String>,
    pub suggested_jobs: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AdvisoryReportRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub industries: Vec<String>,
    pub report_data: Value,
    pub credits_used: i32,
    pub created_at: DateTime<Utc>,
}
