//! Role Categorizer: splits scored career paths into roles reachable now
//! ("immediate") and roles that need more qualification first ("future").
//!
//! Two independent policies keyed on graduation status:
//! - graduated: score ≥ 75 → immediate
//! - not graduated: role level "Entry Level" AND score ≥ 50 → immediate
//!
//! Each path is classified on its own; there is no cross-path ranking constraint.

use serde::{Deserialize, Serialize};

use crate::matching::scorer::ScoredCareerPath;
use crate::models::profile::UserProfile;

pub const GRADUATE_IMMEDIATE_THRESHOLD: u8 = 75;
pub const STUDENT_IMMEDIATE_THRESHOLD: u8 = 50;
const ENTRY_LEVEL: &str = "entry level";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RoleTier {
    Immediate,
    Future,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategorizedRole {
    #[serde(flatten)]
    pub scored: ScoredCareerPath,
    pub tier: RoleTier,
}

/// A user counts as graduated once any education entry is completed.
pub fn is_graduated(profile: &UserProfile) -> bool {
    profile.education.iter().any(|e| e.is_completed())
}

pub fn is_entry_level(role_level: &str) -> bool {
    role_level.trim().eq_ignore_ascii_case(ENTRY_LEVEL)
}

pub fn categorize(graduated: bool, role_level: &str, score: u8) -> RoleTier {
    let immediate = if graduated {
        score >= GRADUATE_IMMEDIATE_THRESHOLD
    } else {
        is_entry_level(role_level) && score >= STUDENT_IMMEDIATE_THRESHOLD
    };

    if immediate {
        RoleTier::Immediate
    } else {
        RoleTier::Future
    }
}

/// Splits ranked paths into (immediate, future). Input order is preserved in both.
pub fn partition_roles(
    ranked: Vec<ScoredCareerPath>,
    graduated: bool,
) -> (Vec<CategorizedRole>, Vec<CategorizedRole>) {
    ranked
        .into_iter()
        .map(|scored| {
            let tier = categorize(graduated, &scored.path.role_level, scored.match_score);
            CategorizedRole { scored, tier }
        })
        .partition(|role| role.tier == RoleTier::Immediate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::scorer::tests::{make_path, make_profile};
    use crate::matching::scorer::{rank_career_paths, MatchWeights};

    #[test]
    fn test_graduate_boundary_is_inclusive_at_75() {
        assert_eq!(categorize(true, "Mid Level", 75), RoleTier::Immediate);
        assert_eq!(categorize(true, "Mid Level", 74), RoleTier::Future);
    }

    #[test]
    fn test_graduate_ignores_role_level() {
        assert_eq!(categorize(true, "Senior", 90), RoleTier::Immediate);
        assert_eq!(categorize(true, "Entry Level", 60), RoleTier::Future);
    }

    #[test]
    fn test_student_entry_level_boundary_is_inclusive_at_50() {
        assert_eq!(categorize(false, "Entry Level", 50), RoleTier::Immediate);
        assert_eq!(categorize(false, "Entry Level", 49), RoleTier::Future);
    }

    #[test]
    fn test_student_role_level_gate_is_mandatory() {
        assert_eq!(categorize(false, "Mid Level", 90), RoleTier::Future);
        assert_eq!(categorize(false, "Senior", 100), RoleTier::Future);
    }

    #[test]
    fn test_entry_level_match_is_case_and_whitespace_tolerant() {
        assert!(is_entry_level("  entry LEVEL "));
        assert!(!is_entry_level("Entry"));
    }

    #[test]
    fn test_is_graduated_requires_a_completed_entry() {
        assert!(is_graduated(&make_profile(&[], &[("BSc", false), ("MSc", true)], 0)));
        assert!(!is_graduated(&make_profile(&[], &[("BSc", false)], 0)));
        assert!(!is_graduated(&make_profile(&[], &[], 0)));
    }

    #[test]
    fn test_partition_preserves_ranking_order() {
        let profile = make_profile(&["rust", "sql"], &[], 1);
        let paths = vec![
            make_path("Junior Dev", "Entry Level", &["rust"], &[], &[], 1),
            make_path("Senior Dev", "Senior", &["rust", "sql"], &[], &[], 1),
            make_path("Trainee", "Entry Level", &["rust", "sql"], &[], &[], 1),
            make_path("Intern", "Entry Level", &["java"], &[], &[], 1),
        ];
        let ranked = rank_career_paths(paths, &profile, &MatchWeights::default());
        let (immediate, future) = partition_roles(ranked, false);

        let immediate: Vec<&str> = immediate
            .iter()
            .map(|r| r.scored.path.role_title.as_str())
            .collect();
        let future: Vec<&str> = future
            .iter()
            .map(|r| r.scored.path.role_title.as_str())
            .collect();

        // The first three all score 50 and keep catalog order.
        assert_eq!(immediate, vec!["Junior Dev", "Trainee"]);
        assert_eq!(future, vec!["Senior Dev", "Intern"]);
    }
}
