use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DegreeType {
    Undergraduate,
    Postgraduate,
}

/// Where the user stands on a degree. Completed degrees carry the year they
/// finished, in-progress ones the year of study.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "completion_status", rename_all = "snake_case")]
pub enum Completion {
    Completed { completion_year: Option<i32> },
    Pursuing { current_year: Option<u8> },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EducationEntry {
    pub degree: String,
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub degree_type: Option<DegreeType>,
    #[serde(flatten)]
    pub completion: Completion,
}

impl EducationEntry {
    pub fn is_completed(&self) -> bool {
        matches!(self.completion, Completion::Completed { .. })
    }

    /// Lower-cased strings matched against a role's education requirements.
    pub fn match_tokens(&self) -> Vec<String> {
        let mut tokens = vec![self.degree.to_lowercase()];
        if let Some(spec) = &self.specialization {
            tokens.push(spec.to_lowercase());
        }
        tokens.retain(|t| !t.trim().is_empty());
        tokens
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CertificationEntry {
    pub name: String,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub credential_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectEntry {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExperienceEntry {
    pub company: String,
    pub role: String,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProfileRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub education: Json<Vec<EducationEntry>>,
    pub certifications: Json<Vec<CertificationEntry>>,
    pub projects: Json<Vec<ProjectEntry>>,
    pub experience: Json<Vec<ExperienceEntry>>,
    pub preferred_industries: Vec<String>,
    pub preferred_locations: Vec<String>,
    pub salary_expectation: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile as seen by the scoring and report code. A user without a stored
/// profile is represented by [`UserProfile::empty`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub education: Vec<EducationEntry>,
    pub certifications: Vec<CertificationEntry>,
    pub projects: Vec<ProjectEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub preferred_industries: Vec<String>,
    pub preferred_locations: Vec<String>,
    pub salary_expectation: Option<String>,
}

impl UserProfile {
    pub fn empty(user_id: Uuid) -> Self {
        Self {
            user_id,
            ..Self::default()
        }
    }

    /// Technical and soft skills together, in that order.
    pub fn all_skills(&self) -> impl Iterator<Item = &str> {
        self.technical_skills
            .iter()
            .chain(self.soft_skills.iter())
            .map(String::as_str)
    }

    pub fn education_tokens(&self) -> Vec<String> {
        self.education
            .iter()
            .flat_map(EducationEntry::match_tokens)
            .collect()
    }
}

impl From<UserProfileRow> for UserProfile {
    fn from(row: UserProfileRow) -> Self {
        Self {
            user_id: row.id,
            name: row.name,
            email: row.email,
            technical_skills: row.technical_skills,
            soft_skills: row.soft_skills,
            education: row.education.0,
            certifications: row.certifications.0,
            projects: row.projects.0,
            experience: row.experience.0,
            preferred_industries: row.preferred_industries,
            preferred_locations: row.preferred_locations,
            salary_expectation: row.salary_expectation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_education_entry_reads_completed_status() {
        let entry: EducationEntry = serde_json::from_value(json!({
            "degree": "B.Tech",
            "specialization": "Computer Science",
            "degree_type": "undergraduate",
            "completion_status": "completed",
            "completion_year": 2022
        }))
        .unwrap();

        assert!(entry.is_completed());
        assert_eq!(
            entry.completion,
            Completion::Completed {
                completion_year: Some(2022)
            }
        );
        assert_eq!(entry.match_tokens(), vec!["b.tech", "computer science"]);
    }

    #[test]
    fn test_education_entry_reads_pursuing_status() {
        let entry: EducationEntry = serde_json::from_value(json!({
            "degree": "MBA",
            "completion_status": "pursuing",
            "current_year": 1
        }))
        .unwrap();

        assert!(!entry.is_completed());
        assert!(entry.specialization.is_none());
    }

    #[test]
    fn test_unknown_completion_status_is_rejected() {
        let result: Result<EducationEntry, _> = serde_json::from_value(json!({
            "degree": "BSc",
            "completion_status": "dropped"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_all_skills_chains_technical_then_soft() {
        let profile = UserProfile {
            technical_skills: vec!["Rust".to_string()],
            soft_skills: vec!["Communication".to_string()],
            ..UserProfile::empty(Uuid::new_v4())
        };
        let skills: Vec<&str> = profile.all_skills().collect();
        assert_eq!(skills, vec!["Rust", "Communication"]);
    }
}
