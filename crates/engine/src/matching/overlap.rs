//! Skill overlap classification — known / partially known / missing.

use serde::{Deserialize, Serialize};

/// Result of classifying a role's required skills against a user's list.
/// All three lists preserve required-skill input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillOverlap {
    pub matched: Vec<String>,
    pub partial: Vec<String>,
    pub missing: Vec<String>,
    /// `(|matched| + 0.5·|partial|) / |required|`, in [0, 1].
    pub score: f64,
}

/// Normalizes text for matching: lowercase, strip everything outside
/// `[a-z0-9 ,]`, collapse whitespace runs.
pub fn normalize_text(text: &str) -> String {
    let lowered: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == ',' {
                c
            } else {
                ' '
            }
        })
        .collect();
    lowered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Classifies each required skill against the user's skill list.
///
/// An exact normalized match wins immediately; otherwise substring
/// containment in either direction counts as partial. One user skill may
/// satisfy several required skills; there is no consumption.
pub fn skill_overlap(user_skills: &[String], required_skills: &[String]) -> SkillOverlap {
    let user_normalized: Vec<String> = user_skills.iter().map(|s| normalize_text(s)).collect();

    let mut matched = Vec::new();
    let mut partial = Vec::new();
    let mut missing = Vec::new();

    for required in required_skills {
        let required_normalized = normalize_text(required);
        let mut exact = false;
        let mut contains = false;

        for user in &user_normalized {
            if *user == required_normalized {
                exact = true;
                break;
            }
            if !user.is_empty()
                && (required_normalized.contains(user.as_str())
                    || user.contains(required_normalized.as_str()))
            {
                contains = true;
            }
        }

        if exact {
            matched.push(required.clone());
        } else if contains {
            partial.push(required.clone());
        } else {
            missing.push(required.clone());
        }
    }

    let score = if required_skills.is_empty() {
        0.0
    } else {
        (matched.len() as f64 + 0.5 * partial.len() as f64) / required_skills.len() as f64
    };

    SkillOverlap {
        matched,
        partial,
        missing,
        score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_strips_punctuation_keeps_commas() {
        assert_eq!(normalize_text("C++ / Node.js!"), "c node js");
        assert_eq!(normalize_text("SQL,  NoSQL"), "sql, nosql");
        assert_eq!(normalize_text("  Rust   Lang  "), "rust lang");
    }

    #[test]
    fn test_exact_match_wins_over_partial() {
        let result = skill_overlap(
            &skills(&["java", "javascript"]),
            &skills(&["JavaScript"]),
        );
        // "java" is a substring, but "javascript" matches exactly
        assert_eq!(result.matched, vec!["JavaScript"]);
        assert!(result.partial.is_empty());
    }

    #[test]
    fn test_substring_either_direction_is_partial() {
        let result = skill_overlap(
            &skills(&["Amazon Web Services AWS"]),
            &skills(&["AWS", "Azure"]),
        );
        assert_eq!(result.partial, vec!["AWS"]);
        assert_eq!(result.missing, vec!["Azure"]);
    }

    #[test]
    fn test_status_assignment_is_a_partition() {
        let required = skills(&["Python", "SQL", "AWS", "Docker", "Kubernetes"]);
        let result = skill_overlap(&skills(&["python", "sql server", "go"]), &required);
        assert_eq!(
            result.matched.len() + result.partial.len() + result.missing.len(),
            required.len()
        );
    }

    #[test]
    fn test_lists_preserve_required_order() {
        let result = skill_overlap(
            &skills(&["docker", "python"]),
            &skills(&["Python", "AWS", "Docker"]),
        );
        assert_eq!(result.matched, vec!["Python", "Docker"]);
        assert_eq!(result.missing, vec!["AWS"]);
    }

    #[test]
    fn test_one_user_skill_contributes_to_many() {
        let result = skill_overlap(&skills(&["sql"]), &skills(&["MySQL", "PostgreSQL"]));
        assert_eq!(result.partial, vec!["MySQL", "PostgreSQL"]);
    }

    #[test]
    fn test_overlap_score_half_known_half_missing() {
        let result = skill_overlap(
            &skills(&["Python", "SQL"]),
            &skills(&["Python", "SQL", "AWS", "Docker"]),
        );
        assert_eq!(result.score, 0.5);
        assert_eq!(result.matched, vec!["Python", "SQL"]);
        assert_eq!(result.missing, vec!["AWS", "Docker"]);
    }

    #[test]
    fn test_score_is_one_iff_all_known() {
        let all_known = skill_overlap(&skills(&["rust", "go"]), &skills(&["Rust", "Go"]));
        assert_eq!(all_known.score, 1.0);

        let with_partial = skill_overlap(&skills(&["rust lang"]), &skills(&["Rust"]));
        assert!(with_partial.score < 1.0);
    }

    #[test]
    fn test_empty_required_scores_zero() {
        let result = skill_overlap(&skills(&["rust"]), &[]);
        assert_eq!(result.score, 0.0);
        assert!(result.matched.is_empty());
    }

    #[test]
    fn test_empty_user_skills_all_missing() {
        let result = skill_overlap(&[], &skills(&["Rust", "Go"]));
        assert_eq!(result.missing, vec!["Rust", "Go"]);
        assert_eq!(result.score, 0.0);
    }
}
