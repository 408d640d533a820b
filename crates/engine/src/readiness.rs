//! Readiness Scorer — collapses a gap analysis into one 0–100 number.
//!
//! Four weighted components: coverage (0.5), importance-weighted coverage
//! (0.25), depth (0.15) and learning consistency (0.10). Depth deliberately
//! gives no credit for partially known skills — it rewards full mastery —
//! while coverage counts them at half weight; both rules are pinned by
//! tests. Consistency is a deterministic placeholder derived from coverage
//! unless the caller supplies a measured value.

use serde::{Deserialize, Serialize};

use crate::gap::{GapAnalysis, SkillStatus};

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// Component weights of the overall score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessWeights {
    pub skill_coverage: f64,
    pub skill_importance: f64,
    pub skill_depth: f64,
    pub learning_consistency: f64,
}

impl Default for ReadinessWeights {
    fn default() -> Self {
        ReadinessWeights {
            skill_coverage: 0.5,
            skill_importance: 0.25,
            skill_depth: 0.15,
            learning_consistency: 0.10,
        }
    }
}

/// Per-component scores, each 0–100 and rounded to 1 decimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skill_coverage: f64,
    pub skill_importance: f64,
    pub skill_depth: f64,
    pub learning_consistency: f64,
}

/// Letter grade over fixed bucket boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

/// The readiness result handed to callers and the simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessScore {
    pub overall_score: f64,
    pub breakdown: ScoreBreakdown,
    pub grade: Grade,
    pub interpretation: String,
    /// Present only on scores produced by a simulation update.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_from_baseline: Option<f64>,
}

/// Named component deltas a scenario applies to a score.
/// `skill_importance` is never perturbed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScoreAdjustments {
    pub coverage_change: f64,
    pub depth_change: f64,
    pub consistency_change: f64,
}

/// A score annotated with its rank among alternatives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedScore {
    pub rank: usize,
    pub score: ReadinessScore,
    pub recommendation: String,
}

/// The four score components, used to address weak areas by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreComponent {
    SkillCoverage,
    SkillImportance,
    SkillDepth,
    LearningConsistency,
}

/// A targeted way to raise the score, with a qualitative payoff estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImprovementSuggestion {
    pub area: ScoreComponent,
    pub current_score: f64,
    pub suggestion: String,
    pub priority_skills: Vec<String>,
    pub potential_improvement: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Scorer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct ReadinessScorer {
    weights: ReadinessWeights,
}

impl ReadinessScorer {
    pub fn new(weights: ReadinessWeights) -> Self {
        ReadinessScorer { weights }
    }

    /// Computes the readiness score for a gap analysis.
    ///
    /// `learning_consistency` is a measured behavioral signal when the
    /// caller has one; otherwise the documented placeholder
    /// `min(coverage·0.8 + 20, 100)` stands in.
    pub fn calculate_score(
        &self,
        gap: &GapAnalysis,
        learning_consistency: Option<f64>,
    ) -> ReadinessScore {
        let total = gap.total_required_skills as f64;
        let known = gap.known_skills_count as f64;
        let partial = gap.partial_skills_count as f64;

        let coverage = if total > 0.0 {
            (known + 0.5 * partial) / total * 100.0
        } else {
            0.0
        };
        let importance = importance_weighted_coverage(gap);
        let depth = if total > 0.0 { known / total * 100.0 } else { 0.0 };
        let consistency =
            learning_consistency.unwrap_or_else(|| (coverage * 0.8 + 20.0).min(100.0));

        let overall = self.weighted_overall(coverage, importance, depth, consistency);

        ReadinessScore {
            overall_score: round1(overall),
            breakdown: ScoreBreakdown {
                skill_coverage: round1(coverage),
                skill_importance: round1(importance),
                skill_depth: round1(depth),
                learning_consistency: round1(consistency),
            },
            grade: grade_for(overall),
            interpretation: interpret(overall).to_string(),
            change_from_baseline: None,
        }
    }

    /// Applies named deltas to a copy of the current breakdown and
    /// recomputes the overall with the same weights. Perturbation scenarios
    /// use this instead of a full re-analysis.
    pub fn update_score_after_simulation(
        &self,
        current: &ReadinessScore,
        changes: &ScoreAdjustments,
    ) -> ReadinessScore {
        let mut breakdown = current.breakdown.clone();
        breakdown.skill_coverage =
            (breakdown.skill_coverage + changes.coverage_change).clamp(0.0, 100.0);
        breakdown.skill_depth = (breakdown.skill_depth + changes.depth_change).clamp(0.0, 100.0);
        breakdown.learning_consistency =
            (breakdown.learning_consistency + changes.consistency_change).clamp(0.0, 100.0);

        let overall = self.weighted_overall(
            breakdown.skill_coverage,
            breakdown.skill_importance,
            breakdown.skill_depth,
            breakdown.learning_consistency,
        );

        ReadinessScore {
            overall_score: round1(overall),
            breakdown,
            grade: grade_for(overall),
            interpretation: interpret(overall).to_string(),
            change_from_baseline: Some(round1(overall - current.overall_score)),
        }
    }

    /// Ranks scores descending and attaches a recommendation per rank.
    pub fn compare_scores(&self, scores: Vec<ReadinessScore>) -> Vec<RankedScore> {
        let mut ordered = scores;
        ordered.sort_by(|a, b| {
            b.overall_score
                .partial_cmp(&a.overall_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        ordered
            .into_iter()
            .enumerate()
            .map(|(index, score)| {
                let recommendation = if index == 0 {
                    "Top Match - Strongest readiness"
                } else if score.overall_score >= 70.0 {
                    "Strong Alternative"
                } else if score.overall_score >= 50.0 {
                    "Viable with Learning"
                } else {
                    "Long-term Goal"
                };
                RankedScore {
                    rank: index + 1,
                    score,
                    recommendation: recommendation.to_string(),
                }
            })
            .collect()
    }

    /// Suggestions for the two weakest components of a score.
    pub fn improvement_suggestions(
        &self,
        score: &ReadinessScore,
        gap: &GapAnalysis,
    ) -> Vec<ImprovementSuggestion> {
        let breakdown = &score.breakdown;
        let mut components = [
            (ScoreComponent::SkillCoverage, breakdown.skill_coverage),
            (ScoreComponent::SkillImportance, breakdown.skill_importance),
            (ScoreComponent::SkillDepth, breakdown.skill_depth),
            (
                ScoreComponent::LearningConsistency,
                breakdown.learning_consistency,
            ),
        ];
        components.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

        components
            .iter()
            .take(2)
            .map(|&(area, current_score)| match area {
                ScoreComponent::SkillCoverage => ImprovementSuggestion {
                    area,
                    current_score,
                    suggestion: format!(
                        "Focus on learning {} missing skills",
                        gap.missing_skills_count
                    ),
                    priority_skills: take3(&gap.priority_skills),
                    potential_improvement: "+15-25 points".to_string(),
                },
                ScoreComponent::SkillImportance => {
                    let critical: Vec<String> = gap
                        .skill_details
                        .iter()
                        .filter(|d| d.status == SkillStatus::Missing && d.importance >= 0.7)
                        .map(|d| d.skill.clone())
                        .collect();
                    ImprovementSuggestion {
                        area,
                        current_score,
                        suggestion: format!(
                            "Prioritize {} high-importance skills",
                            critical.len()
                        ),
                        priority_skills: take3(&critical),
                        potential_improvement: "+20-30 points".to_string(),
                    }
                }
                ScoreComponent::SkillDepth => ImprovementSuggestion {
                    area,
                    current_score,
                    suggestion: format!(
                        "Deepen knowledge in {} partially known skills",
                        gap.partial_skills_count
                    ),
                    priority_skills: take3(&gap.partial_skills),
                    potential_improvement: "+10-15 points".to_string(),
                },
                ScoreComponent::LearningConsistency => ImprovementSuggestion {
                    area,
                    current_score,
                    suggestion: "Maintain a regular learning schedule and track progress"
                        .to_string(),
                    priority_skills: Vec::new(),
                    potential_improvement: "+5-10 points".to_string(),
                },
            })
            .collect()
    }

    fn weighted_overall(
        &self,
        coverage: f64,
        importance: f64,
        depth: f64,
        consistency: f64,
    ) -> f64 {
        coverage * self.weights.skill_coverage
            + importance * self.weights.skill_importance
            + depth * self.weights.skill_depth
            + consistency * self.weights.learning_consistency
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Coverage weighted by importance: `Σ coverage·weight / Σ weight × 100`.
fn importance_weighted_coverage(gap: &GapAnalysis) -> f64 {
    let total_weight: f64 = gap.skill_details.iter().map(|d| d.importance).sum();
    if total_weight <= 0.0 {
        return 0.0;
    }
    let weighted: f64 = gap
        .skill_details
        .iter()
        .map(|d| d.coverage * d.importance)
        .sum();
    weighted / total_weight * 100.0
}

fn grade_for(score: f64) -> Grade {
    if score >= 90.0 {
        Grade::A
    } else if score >= 80.0 {
        Grade::B
    } else if score >= 70.0 {
        Grade::C
    } else if score >= 60.0 {
        Grade::D
    } else {
        Grade::F
    }
}

fn interpret(score: f64) -> &'static str {
    if score >= 85.0 {
        "Excellent! You're highly prepared for this career path."
    } else if score >= 70.0 {
        "Good progress! Focus on remaining gaps to strengthen readiness."
    } else if score >= 55.0 {
        "Moderate readiness. Consistent learning will improve your position."
    } else if score >= 40.0 {
        "Early stage. Significant learning needed, but achievable with focus."
    } else {
        "Beginning journey. Consider building foundational skills first."
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn take3(skills: &[String]) -> Vec<String> {
    skills.iter().take(3).cloned().collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
