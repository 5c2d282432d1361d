use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct JobPostingRow {
    pub id: Uuid,
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub required_skills: Vec<String>,
    pub responsibilities: Vec<String>,
    pub salary: Option<String>,
    pub summary: Option<String>,
    pub source_link: Option<String>,
    pub posted_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GeneratedDocumentRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_posting_id: Uuid,
    pub resume_url: String,
    pub cover_letter_url: String,
    pub credits_used: i32,
    pub created_at: DateTime<Utc>,
}
