//! Career Ranker — blends lexical similarity with skill overlap into a
//! single ranked recommendation list.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::RoleCatalog;
use crate::matching::overlap::skill_overlap;
use crate::models::reference::Role;
use crate::similarity::TfidfIndex;

/// Weight of lexical similarity in the blended match score.
const SIMILARITY_WEIGHT: f64 = 0.4;
/// Weight of skill overlap in the blended match score.
const OVERLAP_WEIGHT: f64 = 0.6;

/// One ranked role recommendation. All scores are 0–100 for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerMatch {
    pub role_id: String,
    pub role_name: String,
    pub category: String,
    pub description: String,
    pub match_score: f64,
    pub similarity_score: f64,
    pub skill_overlap_score: f64,
    pub required_skills: Vec<String>,
    pub matched_skills: Vec<String>,
    pub partial_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub importance_weights: Vec<f64>,
    pub avg_salary: Option<f64>,
    pub growth_rate: String,
}

/// A nearby role, for "you might also consider" listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarCareer {
    pub role_id: String,
    pub role_name: String,
    pub category: String,
    /// 0–100 display scale.
    pub similarity: f64,
}

/// Ranks career roles for a user. The TF-IDF index is fitted once over the
/// role corpus at construction; the catalog is shared read-only.
pub struct CareerMatcher {
    roles: Arc<RoleCatalog>,
    index: TfidfIndex,
}

impl CareerMatcher {
    pub fn new(roles: Arc<RoleCatalog>) -> Self {
        let corpus: Vec<String> = roles.roles().iter().map(corpus_text).collect();
        let index = TfidfIndex::fit(&corpus);
        debug!(roles = roles.len(), "career matcher fitted");
        CareerMatcher { roles, index }
    }

    /// Top-N role recommendations, ranked descending by
    /// `0.4·similarity + 0.6·overlap`. The blend is computed for every role
    /// before ranking; ties keep catalog order (stable sort); `top_n`
    /// truncates after ranking.
    pub fn match_careers(
        &self,
        user_skills: &[String],
        interests: Option<&str>,
        top_n: usize,
    ) -> Vec<CareerMatch> {
        let mut query = user_skills.join(" ");
        if let Some(interests) = interests {
            if !interests.trim().is_empty() {
                query.push(' ');
                query.push_str(interests);
            }
        }
        let similarities = self.index.score(&query);

        let mut matches: Vec<CareerMatch> = self
            .roles
            .roles()
            .iter()
            .zip(similarities)
            .map(|(role, similarity)| {
                let overlap = skill_overlap(user_skills, &role.required_skills);
                let blended = SIMILARITY_WEIGHT * similarity + OVERLAP_WEIGHT * overlap.score;
                CareerMatch {
                    role_id: role.id.clone(),
                    role_name: role.name.clone(),
                    category: role.category.clone(),
                    description: role.description.clone(),
                    match_score: blended * 100.0,
                    similarity_score: similarity * 100.0,
                    skill_overlap_score: overlap.score * 100.0,
                    required_skills: role.required_skills.clone(),
                    matched_skills: overlap.matched,
                    partial_skills: overlap.partial,
                    missing_skills: overlap.missing,
                    importance_weights: role.importance_weights.clone(),
                    avg_salary: role.avg_salary,
                    growth_rate: role.growth_rate.clone(),
                }
            })
            .collect();

        matches.sort_by(|a, b| {
            b.match_score
                .partial_cmp(&a.match_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matches.truncate(top_n);
        matches
    }

    pub fn get_career_details(&self, role_id: &str) -> Option<&Role> {
        self.roles.get(role_id)
    }

    /// Nearest roles by description similarity, excluding the probe role
    /// itself (by index, not by assuming it ranks first).
    pub fn get_similar_careers(&self, role_id: &str, top_n: usize) -> Vec<SimilarCareer> {
        let Some(self_index) = self.roles.index_of(role_id) else {
            return Vec::new();
        };
        let role = &self.roles.roles()[self_index];
        let probe = format!(
            "{} {} {}",
            role.name,
            role.category,
            role.required_skills.join(" ")
        );
        let similarities = self.index.score(&probe);

        let mut candidates: Vec<(usize, f64)> = similarities
            .into_iter()
            .enumerate()
            .filter(|&(index, _)| index != self_index)
            .collect();
        candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        candidates.truncate(top_n);

        candidates
            .into_iter()
            .map(|(index, similarity)| {
                let other = &self.roles.roles()[index];
                SimilarCareer {
                    role_id: other.id.clone(),
                    role_name: other.name.clone(),
                    category: other.category.clone(),
                    similarity: similarity * 100.0,
                }
            })
            .collect()
    }

    /// All roles in a category, catalog order.
    pub fn filter_by_category(&self, category: &str) -> Vec<&Role> {
        self.roles
            .roles()
            .iter()
            .filter(|role| role.category == category)
            .collect()
    }
}

fn corpus_text(role: &Role) -> String {
    format!(
        "{} {} {} {}",
        role.name,
        role.category,
        role.description,
        role.required_skills.join(" ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::reference::RoleRecord;

    fn role_record(id: &str, name: &str, description: &str, required: &str) -> RoleRecord {
        RoleRecord {
            role_id: id.to_string(),
            role_name: name.to_string(),
            category: "Technology".to_string(),
            description: description.to_string(),
            required_skills: required.to_string(),
            importance_weights: "0.9, 0.8, 0.7".to_string(),
            avg_salary: "110000".to_string(),
            growth_rate: "High".to_string(),
        }
    }

    fn matcher() -> CareerMatcher {
        let catalog = RoleCatalog::from_records(&[
            role_record(
                "de",
                "Data Engineer",
                "Designs and operates data pipelines and warehouses",
                "Python, SQL, Airflow",
            ),
            role_record(
                "fe",
                "Frontend Developer",
                "Builds user interfaces for the web",
                "JavaScript, React, CSS",
            ),
            role_record(
                "ml",
                "Machine Learning Engineer",
                "Trains and ships predictive models",
                "Python, Statistics, TensorFlow",
            ),
        ])
        .unwrap();
        CareerMatcher::new(Arc::new(catalog))
    }

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_match_careers_ranks_by_blended_score() {
        let matcher = matcher();
        let matches = matcher.match_careers(&skills(&["Python", "SQL"]), None, 3);

        assert_eq!(matches.len(), 3);
        assert_eq!(matches[0].role_id, "de", "strongest skill overlap wins");
        for pair in matches.windows(2) {
            assert!(pair[0].match_score >= pair[1].match_score);
        }
    }

    #[test]
    fn test_match_scores_are_display_scaled() {
        let matcher = matcher();
        let matches = matcher.match_careers(&skills(&["Python", "SQL", "Airflow"]), None, 1);
        let top = &matches[0];

        assert_eq!(top.skill_overlap_score, 100.0);
        assert!(top.match_score > 60.0, "blend ≥ 0.6 when overlap is full");
        assert!(top.match_score <= 100.0 + 1e-9);
    }

    #[test]
    fn test_top_n_truncates_after_ranking() {
        let matcher = matcher();
        let matches = matcher.match_careers(&skills(&["JavaScript", "React"]), None, 1);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].role_id, "fe");
    }

    #[test]
    fn test_interests_feed_the_similarity_query() {
        let matcher = matcher();
        let without = matcher.match_careers(&skills(&["Python"]), None, 3);
        let with = matcher.match_careers(
            &skills(&["Python"]),
            Some("predictive models and statistics"),
            3,
        );

        let sim = |ms: &[CareerMatch]| {
            ms.iter()
                .find(|m| m.role_id == "ml")
                .map(|m| m.similarity_score)
                .unwrap()
        };
        assert!(sim(&with) > sim(&without));
    }

    #[test]
    fn test_no_skills_still_returns_ranked_list() {
        let matcher = matcher();
        let matches = matcher.match_careers(&[], None, 3);
        assert_eq!(matches.len(), 3);
        for m in &matches {
            assert_eq!(m.match_score, 0.0);
            assert_eq!(m.missing_skills.len(), m.required_skills.len());
        }
    }

    #[test]
    fn test_get_career_details_lookup() {
        let matcher = matcher();
        assert_eq!(matcher.get_career_details("ml").unwrap().name, "Machine Learning Engineer");
        assert!(matcher.get_career_details("cto").is_none());
    }

    #[test]
    fn test_similar_careers_excludes_self() {
        let matcher = matcher();
        let similar = matcher.get_similar_careers("de", 2);
        assert_eq!(similar.len(), 2);
        assert!(similar.iter().all(|s| s.role_id != "de"));
        // shared Python requirement pulls ML closest to DE
        assert_eq!(similar[0].role_id, "ml");
    }

    #[test]
    fn test_similar_careers_unknown_role_is_empty() {
        assert!(matcher().get_similar_careers("cto", 3).is_empty());
    }

    #[test]
    fn test_filter_by_category() {
        let matcher = matcher();
        assert_eq!(matcher.filter_by_category("Technology").len(), 3);
        assert!(matcher.filter_by_category("Finance").is_empty());
    }

    #[test]
    fn test_matches_serialize_to_plain_json() {
        let matcher = matcher();
        let matches = matcher.match_careers(&skills(&["Python"]), None, 1);
        let value = serde_json::to_value(&matches).unwrap();
        assert!(value[0]["match_score"].is_number());
        assert!(value[0]["missing_skills"].is_array());
    }
}
