//! Gap Analyzer — the authoritative per-skill and aggregate breakdown for
//! one user against one role.
//!
//! `overlap_percentage` comes straight from the Skill Matcher's overlap
//! score; `gap_percentage` is computed independently here from the
//! missing/partial counts. The two are related but deliberately sourced
//! apart — keep them distinct.

pub mod learning_path;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::SkillCatalog;
use crate::matching::matcher::CareerMatch;
use crate::matching::overlap::skill_overlap;
use crate::models::reference::{Difficulty, Role, DEFAULT_IMPORTANCE};

pub use learning_path::{format_timeline, learning_path, weekly_plan, LearningPhase, LearningTask};

/// Importance threshold above which a missing skill is priority material.
const PRIORITY_IMPORTANCE: f64 = 0.7;
/// Cap on the priority-skill list.
const PRIORITY_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillStatus {
    Known,
    Partial,
    Missing,
}

/// Per-skill line of a gap analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDetail {
    pub skill: String,
    pub status: SkillStatus,
    /// 1.0 known, 0.5 partial, 0.0 missing.
    pub coverage: f64,
    pub importance: f64,
    /// `coverage · importance`.
    pub weighted_score: f64,
    pub learning_time_weeks: f64,
    pub difficulty: Difficulty,
    pub prerequisites: Vec<String>,
}

/// Full gap analysis for one user against one role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapAnalysis {
    pub career_name: String,
    pub total_required_skills: usize,
    pub known_skills_count: usize,
    pub partial_skills_count: usize,
    pub missing_skills_count: usize,
    /// Skill Matcher's overlap score × 100.
    pub overlap_percentage: f64,
    /// `(missing + 0.5·partial)/total × 100`.
    pub gap_percentage: f64,
    pub matched_skills: Vec<String>,
    pub partial_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    /// Sorted by importance, descending (stable).
    pub skill_details: Vec<SkillDetail>,
    pub estimated_learning_time_weeks: f64,
    /// Missing, high-importance skills whose prerequisites are all known.
    pub priority_skills: Vec<String>,
}

/// Per-candidate gap summary for cross-career comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerGapComparison {
    pub career_name: String,
    pub match_score: f64,
    pub gap_percentage: f64,
    pub missing_count: usize,
    pub learning_time_weeks: f64,
    pub priority_skills: Vec<String>,
}

/// Builds gap analyses over the shared skill roster.
pub struct GapAnalyzer {
    skills: Arc<SkillCatalog>,
}

impl GapAnalyzer {
    pub fn new(skills: Arc<SkillCatalog>) -> Self {
        GapAnalyzer { skills }
    }

    /// Analyzes the gap between a user's skills and a role's requirements.
    /// Unknown skill names resolve to catalog defaults; degenerate inputs
    /// produce zeroed aggregates, never errors.
    pub fn analyze_gap(&self, user_skills: &[String], role: &Role) -> GapAnalysis {
        self.analyze(
            user_skills,
            &role.name,
            &role.required_skills,
            &role.importance_weights,
        )
    }

    /// Same analysis, driven by a ranked match instead of a catalog role.
    pub fn analyze_match(&self, user_skills: &[String], career: &CareerMatch) -> GapAnalysis {
        self.analyze(
            user_skills,
            &career.role_name,
            &career.required_skills,
            &career.importance_weights,
        )
    }

    fn analyze(
        &self,
        user_skills: &[String],
        career_name: &str,
        required_skills: &[String],
        importance_weights: &[f64],
    ) -> GapAnalysis {
        let overlap = skill_overlap(user_skills, required_skills);

        let mut skill_details: Vec<SkillDetail> = required_skills
            .iter()
            .enumerate()
            .map(|(index, skill)| {
                let (status, coverage) = if overlap.matched.contains(skill) {
                    (SkillStatus::Known, 1.0)
                } else if overlap.partial.contains(skill) {
                    (SkillStatus::Partial, 0.5)
                } else {
                    (SkillStatus::Missing, 0.0)
                };
                let importance = importance_weights
                    .get(index)
                    .copied()
                    .unwrap_or(DEFAULT_IMPORTANCE);
                let info = self.skills.learning_info(skill);

                SkillDetail {
                    skill: skill.clone(),
                    status,
                    coverage,
                    importance,
                    weighted_score: coverage * importance,
                    learning_time_weeks: info.weeks,
                    difficulty: info.difficulty,
                    prerequisites: info.prerequisites,
                }
            })
            .collect();

        skill_details.sort_by(|a, b| {
            b.importance
                .partial_cmp(&a.importance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let total = required_skills.len();
        let gap_percentage = if total == 0 {
            0.0
        } else {
            (overlap.missing.len() as f64 + 0.5 * overlap.partial.len() as f64) / total as f64
                * 100.0
        };
        let estimated_learning_time_weeks =
            self.estimate_learning_time(&overlap.missing, &overlap.partial);
        let priority_skills = priority_skills(&skill_details);

        GapAnalysis {
            career_name: career_name.to_string(),
            total_required_skills: total,
            known_skills_count: overlap.matched.len(),
            partial_skills_count: overlap.partial.len(),
            missing_skills_count: overlap.missing.len(),
            overlap_percentage: overlap.score * 100.0,
            gap_percentage,
            matched_skills: overlap.matched,
            partial_skills: overlap.partial,
            missing_skills: overlap.missing,
            skill_details,
            estimated_learning_time_weeks,
            priority_skills,
        }
    }

    /// Weeks to close a gap: full duration per missing skill, half per
    /// partial skill. Continuous/unknown durations use the 4-week default.
    pub fn estimate_learning_time(&self, missing: &[String], partial: &[String]) -> f64 {
        let full: f64 = missing
            .iter()
            .map(|skill| self.skills.learning_info(skill).weeks)
            .sum();
        let half: f64 = partial
            .iter()
            .map(|skill| self.skills.learning_info(skill).weeks * 0.5)
            .sum();
        full + half
    }

    /// Gap summaries across several ranked candidates.
    pub fn compare_careers(
        &self,
        user_skills: &[String],
        careers: &[CareerMatch],
    ) -> Vec<CareerGapComparison> {
        careers
            .iter()
            .map(|career| {
                let gap = self.analyze_match(user_skills, career);
                CareerGapComparison {
                    career_name: career.role_name.clone(),
                    match_score: career.match_score,
                    gap_percentage: gap.gap_percentage,
                    missing_count: gap.missing_skills_count,
                    learning_time_weeks: gap.estimated_learning_time_weeks,
                    priority_skills: gap.priority_skills,
                }
            })
            .collect()
    }
}

/// Missing skills worth starting on now: importance ≥ 0.7 and every
/// prerequisite already known in this analysis. Input must already be
/// importance-descending; output keeps that order, capped at 5.
fn priority_skills(skill_details: &[SkillDetail]) -> Vec<String> {
    let known: Vec<&str> = skill_details
        .iter()
        .filter(|d| d.status == SkillStatus::Known)
        .map(|d| d.skill.as_str())
        .collect();

    skill_details
        .iter()
        .filter(|d| d.status == SkillStatus::Missing && d.importance >= PRIORITY_IMPORTANCE)
        .filter(|d| {
            d.prerequisites
                .iter()
                .all(|p| known.iter().any(|k| k.eq_ignore_ascii_case(p)))
        })
        .map(|d| d.skill.clone())
        .take(PRIORITY_LIMIT)
        .collect()
}
