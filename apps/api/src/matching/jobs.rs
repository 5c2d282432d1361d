//! Job scanning: ranks open job postings by how many of their required
//! skills the user already lists.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::matching::categorizer::CategorizedRole;
use crate::matching::scorer::{overlap_ratio, skill_set};
use crate::models::jobs::JobPostingRow;
use crate::models::profile::UserProfile;

/// Job score at or above which a posting is suggested even without a title match.
pub const SUGGESTION_SCORE_THRESHOLD: u8 = 50;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredJob {
    #[serde(flatten)]
    pub posting: JobPostingRow,
    pub job_score: u8,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

/// Percentage of the posting's required skills the user has. 0 when it lists none.
pub fn score_job_posting(posting: &JobPostingRow, user_skills: &HashSet<String>) -> u8 {
    let required = skill_set(posting.required_skills.iter().map(String::as_str));
    (overlap_ratio(&required, user_skills) * 100.0).round() as u8
}

fn split_skills(posting: &JobPostingRow, user_skills: &HashSet<String>) -> (Vec<String>, Vec<String>) {
    let mut seen = HashSet::new();
    let mut matched = Vec::new();
    let mut missing = Vec::new();
    for skill in &posting.required_skills {
        let key = skill.trim().to_lowercase();
        if key.is_empty() || !seen.insert(key.clone()) {
            continue;
        }
        if user_skills.contains(&key) {
            matched.push(skill.trim().to_string());
        } else {
            missing.push(skill.trim().to_string());
        }
    }
    (matched, missing)
}

/// Scores every posting and sorts best-first; ties keep input order.
pub fn scan_jobs(postings: Vec<JobPostingRow>, profile: &UserProfile) -> Vec<ScoredJob> {
    let user_skills = skill_set(profile.all_skills());
    let mut scored: Vec<ScoredJob> = postings
        .into_iter()
        .map(|posting| {
            let job_score = score_job_posting(&posting, &user_skills);
            let (matched_skills, missing_skills) = split_skills(&posting, &user_skills);
            ScoredJob {
                posting,
                job_score,
                matched_skills,
                missing_skills,
            }
        })
        .collect();
    scored.sort_by(|a, b| b.job_score.cmp(&a.job_score));
    scored
}

/// Postings worth showing next to an analysis: the title names one of the
/// immediate roles, or the skill overlap clears [`SUGGESTION_SCORE_THRESHOLD`].
pub fn suggest_jobs(
    postings: Vec<JobPostingRow>,
    profile: &UserProfile,
    immediate_roles: &[CategorizedRole],
    limit: usize,
) -> Vec<ScoredJob> {
    let role_titles: Vec<String> = immediate_roles
        .iter()
        .map(|r| r.scored.path.role_title.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();

    scan_jobs(postings, profile)
        .into_iter()
        .filter(|job| {
            let title = job.posting.job_title.to_lowercase();
            job.job_score >= SUGGESTION_SCORE_THRESHOLD
                || role_titles.iter().any(|role| title.contains(role.as_str()))
        })
        .take(limit)
        .collect()
}
