use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A catalog role. Static reference data, not owned by any user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct CareerPathRow {
    pub id: Uuid,
    pub industry: String,
    pub role_title: String,
    pub role_level: String,
    pub required_skills: Vec<String>,
    pub recommended_skills: Vec<String>,
    pub min_salary: i64,
    pub max_salary: i64,
    pub growth_rate: f64,
    pub job_outlook: Option<String>,
    pub education_requirements: Vec<String>,
    pub experience_years: i32,
    pub created_at: DateTime<Utc>,
}
