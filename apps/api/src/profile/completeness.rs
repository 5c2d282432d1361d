use serde::{Deserialize, Serialize};

use crate::models::profile::UserProfile;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum SectionStatus {
    Strong,
    Moderate,
    Missing,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionHealth {
    pub section: String,
    pub entry_count: usize,
    pub status: SectionStatus,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletenessReport {
    /// 0.0 – 1.0
    pub overall_score: f64,
    pub sections: Vec<SectionHealth>,
    pub missing_sections: Vec<String>,
}

const SECTION_WEIGHTS: &[(&str, f64)] = &[
    ("education", 0.25),
    ("technical_skills", 0.20),
    ("experience", 0.20),
    ("projects", 0.15),
    ("certifications", 0.10),
    ("preferences", 0.10),
];

/// Entries a section needs before it counts as strong.
const STRONG_AT: &[(&str, usize)] = &[
    ("education", 1),
    ("technical_skills", 5),
    ("experience", 2),
    ("projects", 2),
    ("certifications", 1),
    ("preferences", 2),
];

fn section_count(profile: &UserProfile, section: &str) -> usize {
    match section {
        "education" => profile.education.len(),
        "technical_skills" => profile.technical_skills.len(),
        "experience" => profile.experience.len(),
        "projects" => profile.projects.len(),
        "certifications" => profile.certifications.len(),
        "preferences" => {
            usize::from(!profile.preferred_industries.is_empty())
                + usize::from(!profile.preferred_locations.is_empty())
        }
        _ => 0,
    }
}

fn strong_at(section: &str) -> usize {
    STRONG_AT
        .iter()
        .find(|(key, _)| *key == section)
        .map(|(_, n)| *n)
        .unwrap_or(1)
}

fn missing_recommendation(section: &str) -> String {
    match section {
        "education" => "Add your degree so roles with education requirements can match".to_string(),
        "technical_skills" => "List the technical skills you already use".to_string(),
        "experience" => "Add internships or jobs, even short ones".to_string(),
        "projects" => "Build and showcase relevant projects".to_string(),
        "certifications" => "Obtain industry-relevant certifications".to_string(),
        "preferences" => "Choose a preferred industry and location".to_string(),
        other => format!("Add at least one {other} entry"),
    }
}

/// Weighted presence of each profile section. Present-but-thin sections
/// count for half their weight.
pub fn compute_profile_completeness(profile: &UserProfile) -> CompletenessReport {
    let mut sections = Vec::new();
    let mut missing_sections = Vec::new();
    let mut weighted_score_sum = 0.0;

    for (section_key, weight) in SECTION_WEIGHTS {
        let entry_count = section_count(profile, section_key);
        let target = strong_at(section_key);

        let (status, credit, recommendations) = if entry_count == 0 {
            missing_sections.push(section_key.to_string());
            (
                SectionStatus::Missing,
                0.0,
                vec![missing_recommendation(section_key)],
            )
        } else if entry_count >= target {
            (SectionStatus::Strong, 1.0, vec![])
        } else {
            (
                SectionStatus::Moderate,
                0.5,
                vec![format!(
                    "Add {} more {} to strengthen this section",
                    target - entry_count,
                    section_key.replace('_', " ")
                )],
            )
        };

        weighted_score_sum += credit * weight;
        sections.push(SectionHealth {
            section: section_key.to_string(),
            entry_count,
            status,
            recommendations,
        });
    }

    let total_weight: f64 = SECTION_WEIGHTS.iter().map(|(_, w)| w).sum();
    let overall_score = if total_weight > 0.0 {
        (weighted_score_sum / total_weight).clamp(0.0, 1.0)
    } else {
        0.0
    };

    CompletenessReport {
        overall_score,
        sections,
        missing_sections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::scorer::tests::make_profile;
    use uuid::Uuid;

    #[test]
    fn test_empty_profile_scores_zero_with_every_section_missing() {
        let report = compute_profile_completeness(&UserProfile::empty(Uuid::new_v4()));
        assert_eq!(report.overall_score, 0.0);
        assert_eq!(report.missing_sections.len(), SECTION_WEIGHTS.len());
        assert!(report
            .sections
            .iter()
            .all(|s| s.status == SectionStatus::Missing && s.recommendations.len() == 1));
    }

    #[test]
    fn test_thin_sections_count_half() {
        // One skill (moderate), one completed degree (strong), one job (moderate).
        let profile = make_profile(&["rust"], &[("BSc", true)], 1);
        let report = compute_profile_completeness(&profile);
        // 0.25 + 0.5 * 0.20 + 0.5 * 0.20 = 0.45
        assert!((report.overall_score - 0.45).abs() < 1e-9, "got {}", report.overall_score);

        let skills = report
            .sections
            .iter()
            .find(|s| s.section == "technical_skills")
            .unwrap();
        assert_eq!(skills.status, SectionStatus::Moderate);
        assert!(skills.recommendations[0].contains("4 more technical skills"));
    }

    #[test]
    fn test_preferences_need_industry_and_location() {
        let mut profile = UserProfile::empty(Uuid::new_v4());
        profile.preferred_industries = vec!["finance".to_string()];
        let report = compute_profile_completeness(&profile);
        let prefs = report
            .sections
            .iter()
            .find(|s| s.section == "preferences")
            .unwrap();
        assert_eq!(prefs.status, SectionStatus::Moderate);

        profile.preferred_locations = vec!["Pune".to_string()];
        let report = compute_profile_completeness(&profile);
        assert!(!report.missing_sections.contains(&"preferences".to_string()));
    }
}
