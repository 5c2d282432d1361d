use std::collections::HashSet;

use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::{
    CertificationEntry, EducationEntry, ExperienceEntry, ProjectEntry, UserProfile,
};

/// Intake form submission. Also used for later profile edits.
#[derive(Debug, Clone, Deserialize)]
pub struct IntakeRequest {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub technical_skills: Vec<String>,
    #[serde(default)]
    pub soft_skills: Vec<String>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub certifications: Vec<CertificationEntry>,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub preferred_industries: Vec<String>,
    /// Entries may themselves be comma-separated ("Berlin, Remote").
    #[serde(default)]
    pub preferred_locations: Vec<String>,
    #[serde(default)]
    pub salary_expectation: Option<String>,
}

/// Cleans a submission into a storable profile: trims text, drops blank
/// rows the form leaves behind, and de-duplicates skills case-insensitively.
pub fn normalize_intake(req: IntakeRequest) -> Result<UserProfile, AppError> {
    let name = req.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }
    let email = req.email.trim().to_string();
    if !is_plausible_email(&email) {
        return Err(AppError::Validation(format!("'{email}' is not a valid email")));
    }

    let technical_skills = dedup_trimmed(req.technical_skills.iter().map(String::as_str), &HashSet::new());
    let technical_keys: HashSet<String> = technical_skills.iter().map(|s| s.to_lowercase()).collect();
    let soft_skills = dedup_trimmed(req.soft_skills.iter().map(String::as_str), &technical_keys);

    let education = req
        .education
        .into_iter()
        .filter_map(|mut e| {
            e.degree = e.degree.trim().to_string();
            e.specialization = non_blank(e.specialization);
            (!e.degree.is_empty()).then_some(e)
        })
        .collect();

    let certifications = req
        .certifications
        .into_iter()
        .filter_map(|mut c| {
            c.name = c.name.trim().to_string();
            c.issuer = non_blank(c.issuer);
            c.credential_id = non_blank(c.credential_id);
            (!c.name.is_empty()).then_some(c)
        })
        .collect();

    let projects = req
        .projects
        .into_iter()
        .filter_map(|mut p| {
            p.name = p.name.trim().to_string();
            p.description = non_blank(p.description);
            p.url = non_blank(p.url);
            p.technologies = dedup_trimmed(p.technologies.iter().map(String::as_str), &HashSet::new());
            (!p.name.is_empty()).then_some(p)
        })
        .collect();

    let experience = req
        .experience
        .into_iter()
        .filter_map(|mut x| {
            x.company = x.company.trim().to_string();
            x.role = x.role.trim().to_string();
            x.duration = non_blank(x.duration);
            x.description = non_blank(x.description);
            (!x.company.is_empty() || !x.role.is_empty()).then_some(x)
        })
        .collect();

    let preferred_industries =
        dedup_trimmed(req.preferred_industries.iter().map(String::as_str), &HashSet::new());
    let preferred_locations = dedup_trimmed(
        req.preferred_locations.iter().flat_map(|l| l.split(',')),
        &HashSet::new(),
    );

    Ok(UserProfile {
        user_id: req.user_id,
        name,
        email,
        technical_skills,
        soft_skills,
        education,
        certifications,
        projects,
        experience,
        preferred_industries,
        preferred_locations,
        salary_expectation: non_blank(req.salary_expectation),
    })
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Trims, drops blanks, and keeps the first spelling of each case-insensitive value
/// not already in `exclude`.
fn dedup_trimmed<'a>(
    values: impl IntoIterator<Item = &'a str>,
    exclude: &HashSet<String>,
) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .filter(|v| {
            let key = v.to_lowercase();
            !exclude.contains(&key) && seen.insert(key)
        })
        .map(str::to_string)
        .collect()
}
