use sqlx::types::Json;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::{UserProfile, UserProfileRow};

pub async fn get_profile(pool: &PgPool, user_id: Uuid) -> Result<Option<UserProfile>, AppError> {
    let row = sqlx::query_as::<_, UserProfileRow>("SELECT * FROM user_profiles WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(UserProfile::from))
}

/// Loads a profile, treating a missing one as a brand-new user with empty sections.
pub async fn load_profile_or_empty(pool: &PgPool, user_id: Uuid) -> Result<UserProfile, AppError> {
    match get_profile(pool, user_id).await? {
        Some(profile) => Ok(profile),
        None => {
            debug!("No profile for user {user_id}; using empty profile");
            Ok(UserProfile::empty(user_id))
        }
    }
}

/// Inserts or replaces the user's profile. Profiles are never hard-deleted.
pub async fn upsert_profile(pool: &PgPool, profile: &UserProfile) -> Result<UserProfile, AppError> {
    let row = sqlx::query_as::<_, UserProfileRow>(
        r#"
        INSERT INTO user_profiles
            (id, name, email, technical_skills, soft_skills, education, certifications,
             projects, experience, preferred_industries, preferred_locations, salary_expectation)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        ON CONFLICT (id) DO UPDATE SET
            name = EXCLUDED.name,
            email = EXCLUDED.email,
            technical_skills = EXCLUDED.technical_skills,
            soft_skills = EXCLUDED.soft_skills,
            education = EXCLUDED.education,
            certifications = EXCLUDED.certifications,
            projects = EXCLUDED.projects,
            experience = EXCLUDED.experience,
            preferred_industries = EXCLUDED.preferred_industries,
            preferred_locations = EXCLUDED.preferred_locations,
            salary_expectation = EXCLUDED.salary_expectation,
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(profile.user_id)
    .bind(&profile.name)
    .bind(&profile.email)
    .bind(&profile.technical_skills)
    .bind(&profile.soft_skills)
    .bind(Json(&profile.education))
    .bind(Json(&profile.certifications))
    .bind(Json(&profile.projects))
    .bind(Json(&profile.experience))
    .bind(&profile.preferred_industries)
    .bind(&profile.preferred_locations)
    .bind(&profile.salary_expectation)
    .fetch_one(pool)
    .await?;

    info!("Upserted profile for user {}", profile.user_id);
    Ok(row.into())
}
