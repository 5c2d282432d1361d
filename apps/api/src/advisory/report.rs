//! Report Assembler: skill gaps across a user's preferred industries and a
//! fixed-order upskilling roadmap. Deterministic: same input, same report.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::career::CareerPathRow;
use crate::models::profile::UserProfile;

const GAP_ROADMAP: &[&str] = &[
    "Complete online courses for missing technical skills",
    "Build projects to demonstrate practical knowledge",
    "Obtain relevant certifications",
    "Gain hands-on experience through internships",
    "Network with professionals in your field",
];
const NO_PROJECTS_STEP: &str = "Build and showcase relevant projects";
const NO_CERTIFICATIONS_STEP: &str = "Obtain industry-relevant certifications";

/// Gaps that get a dedicated course recommendation.
const COURSE_RECOMMENDATION_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    Course,
    Certification,
    Project,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdvisoryReport {
    pub skill_gaps: Vec<String>,
    pub roadmap: Vec<String>,
    pub recommendations: Vec<Recommendation>,
    pub required_skills: Vec<String>,
    pub has_projects: bool,
    pub has_certifications: bool,
}

/// Required skills across all paths, first spelling wins, catalog order.
pub fn required_skill_union(paths: &[CareerPathRow]) -> Vec<String> {
    let mut seen = HashSet::new();
    paths
        .iter()
        .flat_map(|p| p.required_skills.iter())
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && seen.insert(s.to_lowercase()))
        .map(str::to_string)
        .collect()
}

/// `required − user_skills`, compared case-insensitively, order kept.
pub fn skill_gaps<'a>(required: &[String], user_skills: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let have: HashSet<String> = user_skills
        .into_iter()
        .map(|s| s.trim().to_lowercase())
        .collect();
    let mut seen = HashSet::new();
    required
        .iter()
        .filter(|s| {
            let key = s.trim().to_lowercase();
            !have.contains(&key) && seen.insert(key)
        })
        .cloned()
        .collect()
}

pub fn build_roadmap(gaps: &[String], has_projects: bool, has_certifications: bool) -> Vec<String> {
    let mut roadmap: Vec<String> = if gaps.is_empty() {
        Vec::new()
    } else {
        GAP_ROADMAP.iter().map(|s| s.to_string()).collect()
    };
    if !has_projects {
        roadmap.insert(0, NO_PROJECTS_STEP.to_string());
    }
    if !has_certifications {
        roadmap.insert(0, NO_CERTIFICATIONS_STEP.to_string());
    }
    roadmap
}

pub fn build_recommendations(
    gaps: &[String],
    has_projects: bool,
    has_certifications: bool,
) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = gaps
        .iter()
        .take(COURSE_RECOMMENDATION_LIMIT)
        .map(|gap| Recommendation {
            kind: RecommendationKind::Course,
            title: format!("{gap} fundamentals course"),
        })
        .collect();

    if !has_certifications {
        let title = match gaps.first() {
            Some(gap) => format!("Entry-level certification covering {gap}"),
            None => "Entry-level certification in your target industry".to_string(),
        };
        recommendations.push(Recommendation {
            kind: RecommendationKind::Certification,
            title,
        });
    }
    if !has_projects {
        let title = match gaps.first() {
            Some(gap) => format!("Portfolio project applying {gap}"),
            None => "Portfolio project in your target industry".to_string(),
        };
        recommendations.push(Recommendation {
            kind: RecommendationKind::Project,
            title,
        });
    }
    recommendations
}

pub fn assemble_report(profile: &UserProfile, paths: &[CareerPathRow]) -> AdvisoryReport {
    let required_skills = required_skill_union(paths);
    let gaps = skill_gaps(&required_skills, profile.all_skills());
    let has_projects = !profile.projects.is_empty();
    let has_certifications = !profile.certifications.is_empty();

    AdvisoryReport {
        roadmap: build_roadmap(&gaps, has_projects, has_certifications),
        recommendations: build_recommendations(&gaps, has_projects, has_certifications),
        skill_gaps: gaps,
        required_skills,
        has_projects,
        has_certifications,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::scorer::tests::{make_path, make_profile};
    use crate::models::profile::{CertificationEntry, ProjectEntry};

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_union_dedupes_case_insensitively_in_catalog_order() {
        let paths = vec![
            make_path("A", "Entry Level", &["SQL", "Python"], &[], &[], 0),
            make_path("B", "Entry Level", &["python", "Tableau", " "], &[], &[], 0),
        ];
        assert_eq!(required_skill_union(&paths), strings(&["SQL", "Python", "Tableau"]));
    }

    #[test]
    fn test_skill_gaps_is_set_difference() {
        let required = strings(&["SQL", "Python", "Tableau"]);
        let gaps = skill_gaps(&required, ["python", "Excel"]);
        assert_eq!(gaps, strings(&["SQL", "Tableau"]));
    }

    #[test]
    fn test_skill_gaps_empty_when_user_covers_everything() {
        let required = strings(&["Go"]);
        assert!(skill_gaps(&required, ["go", "rust"]).is_empty());
    }

    #[test]
    fn test_roadmap_prepends_certifications_then_projects() {
        let roadmap = build_roadmap(&strings(&["SQL"]), false, false);
        assert_eq!(roadmap.len(), 7);
        assert_eq!(roadmap[0], NO_CERTIFICATIONS_STEP);
        assert_eq!(roadmap[1], NO_PROJECTS_STEP);
        assert_eq!(roadmap[2], GAP_ROADMAP[0]);
    }

    #[test]
    fn test_roadmap_without_gaps_only_has_missing_sections() {
        assert_eq!(build_roadmap(&[], true, false), strings(&[NO_CERTIFICATIONS_STEP]));
        assert!(build_roadmap(&[], true, true).is_empty());
    }

    #[test]
    fn test_recommendations_cover_top_three_gaps() {
        let gaps = strings(&["A", "B", "C", "D"]);
        let recs = build_recommendations(&gaps, true, true);
        assert_eq!(recs.len(), 3);
        assert!(recs.iter().all(|r| r.kind == RecommendationKind::Course));
        assert_eq!(recs[0].title, "A fundamentals course");
    }

    #[test]
    fn test_recommendation_serializes_kind_as_type() {
        let rec = Recommendation {
            kind: RecommendationKind::Certification,
            title: "x".to_string(),
        };
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["type"], "certification");
    }

    #[test]
    fn test_assemble_report_is_idempotent() {
        let mut profile = make_profile(&["SQL"], &[], 0);
        profile.projects = vec![ProjectEntry {
            name: "Dashboard".to_string(),
            description: None,
            is_published: true,
            url: None,
            technologies: vec![],
        }];
        profile.certifications = vec![CertificationEntry {
            name: "Data Analyst Associate".to_string(),
            issuer: None,
            year: Some(2023),
            credential_id: None,
        }];
        let paths = vec![make_path("Analyst", "Entry Level", &["SQL", "Power BI"], &[], &[], 0)];

        let first = assemble_report(&profile, &paths);
        let second = assemble_report(&profile, &paths);
        assert_eq!(first, second);
        assert_eq!(first.skill_gaps, strings(&["Power BI"]));
        assert!(first.has_projects && first.has_certifications);
        assert_eq!(first.roadmap, strings(GAP_ROADMAP));
    }
}
