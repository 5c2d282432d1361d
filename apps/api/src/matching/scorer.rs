//! Match Scorer: how well a user's profile lines up with a catalog role.
//!
//! The score is a weighted sum out of 100:
//! - required-skill overlap ratio × 30
//! - recommended-skill overlap ratio × 20
//! - 30 flat if any education requirement appears inside any of the user's
//!   education tokens (case-insensitive substring), else 0
//! - experience entries vs required years, capped at 20
//!
//! Skill comparison is case-insensitive over sets. An empty skill set
//! contributes 0 rather than dividing by zero.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::career::CareerPathRow;
use crate::models::profile::UserProfile;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchWeights {
    pub required_skills: f64,
    pub recommended_skills: f64,
    pub education: f64,
    pub experience: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            required_skills: 30.0,
            recommended_skills: 20.0,
            education: 30.0,
            experience: 20.0,
        }
    }
}

/// A catalog role enriched with the user's match score and display labels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredCareerPath {
    #[serde(flatten)]
    pub path: CareerPathRow,
    pub match_score: u8,
    pub salary_range: String,
    pub growth_indicator: String,
}

/// Lower-cased, de-duplicated skill set.
pub fn skill_set<'a>(skills: impl IntoIterator<Item = &'a str>) -> HashSet<String> {
    skills
        .into_iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Fraction of `wanted` present in `have`. Empty `wanted` yields 0.0.
pub fn overlap_ratio(wanted: &HashSet<String>, have: &HashSet<String>) -> f64 {
    if wanted.is_empty() {
        return 0.0;
    }
    let hits = wanted.iter().filter(|s| have.contains(*s)).count();
    hits as f64 / wanted.len() as f64
}

fn education_matches(requirements: &[String], user_tokens: &[String]) -> bool {
    requirements
        .iter()
        .map(|r| r.trim().to_lowercase())
        .filter(|r| !r.is_empty())
        .any(|req| user_tokens.iter().any(|tok| tok.contains(&req)))
}

fn experience_ratio(entry_count: usize, required_years: i32) -> f64 {
    if required_years <= 0 || entry_count as i64 >= required_years as i64 {
        return 1.0;
    }
    entry_count as f64 / required_years as f64
}

/// Scores one career path against a profile. Always within 0–100.
pub fn score_career_path(path: &CareerPathRow, profile: &UserProfile, weights: &MatchWeights) -> u8 {
    let user_skills = skill_set(profile.all_skills());
    let required = skill_set(path.required_skills.iter().map(String::as_str));
    let recommended = skill_set(path.recommended_skills.iter().map(String::as_str));

    let mut score = 0.0;
    score += weights.required_skills * overlap_ratio(&required, &user_skills);
    score += weights.recommended_skills * overlap_ratio(&recommended, &user_skills);

    if education_matches(&path.education_requirements, &profile.education_tokens()) {
        score += weights.education;
    }

    score += weights.experience * experience_ratio(profile.experience.len(), path.experience_years);

    score.round().clamp(0.0, 100.0) as u8
}

/// `"$50,000 - $80,000"`.
pub fn salary_range_label(min_salary: i64, max_salary: i64) -> String {
    format!(
        "${} - ${}",
        group_thousands(min_salary),
        group_thousands(max_salary)
    )
}

pub fn growth_indicator(growth_rate: f64) -> &'static str {
    if growth_rate >= 10.0 {
        "High Growth"
    } else if growth_rate >= 5.0 {
        "Moderate Growth"
    } else {
        "Stable"
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if value < 0 {
        out.insert(0, '-');
    }
    out
}

/// Scores every path and sorts best-first. Ties keep catalog order.
pub fn rank_career_paths(
    paths: Vec<CareerPathRow>,
    profile: &UserProfile,
    weights: &MatchWeights,
) -> Vec<ScoredCareerPath> {
    let mut scored: Vec<ScoredCareerPath> = paths
        .into_iter()
        .map(|path| {
            let match_score = score_career_path(&path, profile, weights);
            ScoredCareerPath {
                salary_range: salary_range_label(path.min_salary, path.max_salary),
                growth_indicator: growth_indicator(path.growth_rate).to_string(),
                match_score,
                path,
            }
        })
        .collect();

    scored.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    scored
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::profile::{Completion, EducationEntry, ExperienceEntry};
    use chrono::Utc;
    use uuid::Uuid;

    pub(crate) fn make_path(
        title: &str,
        level: &str,
        required: &[&str],
        recommended: &[&str],
        education: &[&str],
        years: i32,
    ) -> CareerPathRow {
        CareerPathRow {
            id: Uuid::new_v4(),
            industry: "technology".to_string(),
            role_title: title.to_string(),
            role_level: level.to_string(),
            required_skills: required.iter().map(|s| s.to_string()).collect(),
            recommended_skills: recommended.iter().map(|s| s.to_string()).collect(),
            min_salary: 50_000,
            max_salary: 80_000,
            growth_rate: 7.5,
            job_outlook: None,
            education_requirements: education.iter().map(|s| s.to_string()).collect(),
            experience_years: years,
            created_at: Utc::now(),
        }
    }

    pub(crate) fn make_profile(skills: &[&str], degrees: &[(&str, bool)], jobs: usize) -> UserProfile {
        UserProfile {
            technical_skills: skills.iter().map(|s| s.to_string()).collect(),
            education: degrees
                .iter()
                .map(|(degree, completed)| EducationEntry {
                    degree: degree.to_string(),
                    specialization: None,
                    degree_type: None,
                    completion: if *completed {
                        Completion::Completed {
                            completion_year: Some(2021),
                        }
                    } else {
                        Completion::Pursuing {
                            current_year: Some(3),
                        }
                    },
                })
                .collect(),
            experience: (0..jobs)
                .map(|i| ExperienceEntry {
                    company: format!("Company {i}"),
                    role: "Engineer".to_string(),
                    duration: Some("1 year".to_string()),
                    description: None,
                })
                .collect(),
            ..UserProfile::empty(Uuid::new_v4())
        }
    }

    #[test]
    fn test_full_match_scores_100() {
        let path = make_path(
            "Backend Engineer",
            "Mid Level",
            &["Rust", "SQL", "Docker"],
            &["Rust", "SQL"],
            &["Computer Science"],
            2,
        );
        let profile = make_profile(
            &["rust", "sql", "docker", "kubernetes"],
            &[("B.Sc Computer Science", true)],
            3,
        );
        assert_eq!(score_career_path(&path, &profile, &MatchWeights::default()), 100);
    }

    #[test]
    fn test_empty_skill_sets_contribute_zero() {
        let path = make_path("Analyst", "Entry Level", &[], &[], &["Statistics"], 0);
        let profile = make_profile(&["excel"], &[("BA Economics", true)], 0);
        // No skills, no education match, zero required years => only experience counts.
        assert_eq!(score_career_path(&path, &profile, &MatchWeights::default()), 20);
    }

    #[test]
    fn test_partial_required_and_recommended_overlap() {
        let path = make_path(
            "Data Engineer",
            "Mid Level",
            &["Python", "SQL", "Spark", "Airflow"],
            &["Kafka", "dbt"],
            &[],
            1,
        );
        let profile = make_profile(&["Python", "SQL", "Kafka"], &[], 1);
        // 30 * 2/4 + 20 * 1/2 + 0 + 20 = 15 + 10 + 20 = 45
        assert_eq!(score_career_path(&path, &profile, &MatchWeights::default()), 45);
    }

    #[test]
    fn test_experience_is_prorated_below_required_years() {
        let path = make_path("Lead", "Senior", &[], &[], &[], 4);
        let profile = make_profile(&[], &[], 1);
        // 20 * 1/4 = 5
        assert_eq!(score_career_path(&path, &profile, &MatchWeights::default()), 5);
    }

    #[test]
    fn test_education_is_binary_substring_match() {
        let path = make_path("Designer", "Entry Level", &[], &[], &["design", "arts"], 5);
        let matched = make_profile(&[], &[("Bachelor of Fine Arts", false)], 0);
        let unmatched = make_profile(&[], &[("Diploma in Nursing", true)], 0);

        assert_eq!(score_career_path(&path, &matched, &MatchWeights::default()), 30);
        assert_eq!(score_career_path(&path, &unmatched, &MatchWeights::default()), 0);
    }

    #[test]
    fn test_duplicate_required_skills_collapse() {
        let path = make_path("Dev", "Entry Level", &["Go", "go", "GO", "Rust"], &[], &[], 0);
        let profile = make_profile(&["go"], &[], 0);
        // required set = {go, rust}; 30 * 1/2 + 20 = 35
        assert_eq!(score_career_path(&path, &profile, &MatchWeights::default()), 35);
    }

    #[test]
    fn test_score_bounded_0_to_100() {
        let path = make_path("Dev", "Entry Level", &["a"], &["a"], &["x"], 0);
        let profile = make_profile(&["a"], &[("x", true)], 50);
        let heavy = MatchWeights {
            required_skills: 300.0,
            ..MatchWeights::default()
        };
        assert_eq!(score_career_path(&path, &profile, &heavy), 100);
    }

    #[test]
    fn test_rank_sorts_descending_and_keeps_catalog_order_on_ties() {
        let profile = make_profile(&["rust"], &[], 0);
        let first_tie = make_path("First", "Entry Level", &["java"], &[], &[], 1);
        let best = make_path("Best", "Entry Level", &["rust"], &[], &[], 1);
        let second_tie = make_path("Second", "Entry Level", &["go"], &[], &[], 1);

        let ranked = rank_career_paths(
            vec![first_tie, best, second_tie],
            &profile,
            &MatchWeights::default(),
        );
        let titles: Vec<&str> = ranked.iter().map(|s| s.path.role_title.as_str()).collect();
        assert_eq!(titles, vec!["Best", "First", "Second"]);
    }

    #[test]
    fn test_salary_range_label_groups_thousands() {
        assert_eq!(salary_range_label(50_000, 1_250_000), "$50,000 - $1,250,000");
        assert_eq!(salary_range_label(0, 999), "$0 - $999");
    }

    #[test]
    fn test_growth_indicator_thresholds() {
        assert_eq!(growth_indicator(10.0), "High Growth");
        assert_eq!(growth_indicator(9.9), "Moderate Growth");
        assert_eq!(growth_indicator(5.0), "Moderate Growth");
        assert_eq!(growth_indicator(4.99), "Stable");
    }
}
