use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserCreditsRow {
    pub user_id: Uuid,
    pub total_credits: i32,
    pub used_credits: i32,
    pub updated_at: DateTime<Utc>,
}
