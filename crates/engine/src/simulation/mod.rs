//! What-if simulation engine.
//!
//! # Architecture
//! - [`Simulator::create_baseline`] freezes a full analysis for one role.
//!   The baseline is an immutable snapshot; every scenario reads it by
//!   reference and clones before touching anything, so two scenarios over
//!   the same baseline never alias state.
//! - Switch-career and add-skills scenarios are full re-analyses through
//!   the Gap Analyzer and Readiness Scorer. Skip-certifications,
//!   focus-projects and pause-learning are perturbations: they adjust the
//!   cloned aggregates and route score deltas through
//!   `update_score_after_simulation` instead of recomputing from scratch.
//! - Set-difference outputs preserve first-operand order, so identical
//!   inputs always produce identical records.
//!
//! Scenarios never fail: empty skill-name lists are no-ops with zero
//! deltas, and unknown skill names resolve to catalog defaults.

pub mod session;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::catalog::SkillCatalog;
use crate::gap::{GapAnalysis, GapAnalyzer};
use crate::models::profile::dedup_skills;
use crate::models::reference::Role;
use crate::readiness::{ReadinessScore, ReadinessScorer, ScoreAdjustments};

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// Joint risk classification from readiness score and gap percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskLevel {
    /// Cascading thresholds: each tier requires both conditions.
    pub fn classify(readiness_score: f64, gap_percentage: f64) -> RiskLevel {
        if readiness_score >= 80.0 && gap_percentage <= 20.0 {
            RiskLevel::Low
        } else if readiness_score >= 60.0 && gap_percentage <= 40.0 {
            RiskLevel::Medium
        } else if readiness_score >= 40.0 && gap_percentage <= 60.0 {
            RiskLevel::High
        } else {
            RiskLevel::VeryHigh
        }
    }
}

/// The frozen reference analysis every scenario is diffed against.
/// Created once per role selection; replaced, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Baseline {
    pub user_skills: Vec<String>,
    pub career: String,
    pub gap_analysis: GapAnalysis,
    pub readiness_score: ReadinessScore,
    pub learning_time_weeks: f64,
    pub risk_level: RiskLevel,
    pub created_at: DateTime<Utc>,
}

/// Scenario identity plus its scenario-specific outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioDetail {
    SwitchCareer {
        from_career: String,
        to_career: String,
        /// Required skills missing for the new role but not the old one.
        newly_missing: Vec<String>,
        /// Skills missing for the old role that the new one doesn't need.
        removed_requirements: Vec<String>,
    },
    SkipCertifications {
        skipped: Vec<String>,
        removed_skills: Vec<String>,
    },
    FocusProjects {
        focus_skills: Vec<String>,
        newly_mastered: Vec<String>,
    },
    PauseLearning {
        pause_weeks: u32,
        decay_penalty: f64,
    },
    AddSkills {
        added_skills: Vec<String>,
        /// Added skills that actually landed in the known set.
        moved_to_known: Vec<String>,
    },
}

impl ScenarioDetail {
    pub fn label(&self) -> &'static str {
        match self {
            ScenarioDetail::SwitchCareer { .. } => "Switch Career",
            ScenarioDetail::SkipCertifications { .. } => "Skip Certifications",
            ScenarioDetail::FocusProjects { .. } => "Focus on Projects",
            ScenarioDetail::PauseLearning { .. } => "Pause Learning",
            ScenarioDetail::AddSkills { .. } => "Add Skills",
        }
    }
}

/// Deltas versus the baseline, common to every scenario.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChangeSummary {
    pub score_change: f64,
    pub time_change: f64,
    pub gap_change: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryKind {
    Warning,
    Benefit,
}

/// A cautionary or encouraging note attached to a scenario outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Advisory {
    pub kind: AdvisoryKind,
    pub message: String,
}

/// One alternate-timeline state derived from a baseline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub id: Uuid,
    pub scenario: ScenarioDetail,
    pub career: String,
    pub user_skills: Vec<String>,
    pub gap_analysis: GapAnalysis,
    pub readiness_score: ReadinessScore,
    pub learning_time_weeks: f64,
    pub risk_level: RiskLevel,
    pub changes: ChangeSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisory: Option<Advisory>,
    pub created_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Simulator
// ────────────────────────────────────────────────────────────────────────────

/// Runs baseline analyses and scenario transforms. Pure with respect to its
/// inputs: every operation is a function of (baseline, parameters).
pub struct Simulator {
    analyzer: GapAnalyzer,
    scorer: ReadinessScorer,
}

impl Simulator {
    pub fn new(skills: Arc<SkillCatalog>) -> Self {
        Simulator {
            analyzer: GapAnalyzer::new(skills),
            scorer: ReadinessScorer::default(),
        }
    }

    /// Full analysis of a role: the reference point for all deltas.
    pub fn create_baseline(&self, user_skills: &[String], role: &Role) -> Baseline {
        let user_skills = dedup_skills(user_skills);
        let gap_analysis = self.analyzer.analyze_gap(&user_skills, role);
        let readiness_score = self.scorer.calculate_score(&gap_analysis, None);
        let learning_time_weeks = gap_analysis.estimated_learning_time_weeks;
        let risk_level = RiskLevel::classify(
            readiness_score.overall_score,
            gap_analysis.gap_percentage,
        );

        debug!(career = %role.name, score = readiness_score.overall_score, "baseline created");
        Baseline {
            user_skills,
            career: role.name.clone(),
            gap_analysis,
            readiness_score,
            learning_time_weeks,
            risk_level,
            created_at: Utc::now(),
        }
    }

    /// Re-analyzes the same skills against a different role. This is a full
    /// re-run, not a perturbation.
    pub fn simulate_switch_career(&self, baseline: &Baseline, new_role: &Role) -> SimulationResult {
        let gap = self.analyzer.analyze_gap(&baseline.user_skills, new_role);
        let score = self.scorer.calculate_score(&gap, None);

        let newly_missing = difference(&gap.missing_skills, &baseline.gap_analysis.missing_skills);
        let removed_requirements =
            difference(&baseline.gap_analysis.missing_skills, &gap.missing_skills);

        let changes = ChangeSummary {
            score_change: score.overall_score - baseline.readiness_score.overall_score,
            time_change: gap.estimated_learning_time_weeks - baseline.learning_time_weeks,
            gap_change: gap.gap_percentage - baseline.gap_analysis.gap_percentage,
        };

        self.finish(
            ScenarioDetail::SwitchCareer {
                from_career: baseline.career.clone(),
                to_career: new_role.name.clone(),
                newly_missing,
                removed_requirements,
            },
            new_role.name.clone(),
            baseline.user_skills.clone(),
            gap,
            score,
            changes,
            None,
        )
    }

    /// Drops named certification skills from the missing set and rescores
    /// with a fixed perturbation. Always warns about competitiveness.
    pub fn simulate_skip_certifications(
        &self,
        baseline: &Baseline,
        certification_skills: &[String],
    ) -> SimulationResult {
        let mut gap = baseline.gap_analysis.clone();

        let original_missing = gap.missing_skills.clone();
        gap.missing_skills
            .retain(|skill| !certification_skills.contains(skill));
        let removed_skills = difference(&original_missing, &gap.missing_skills);

        gap.missing_skills_count = gap.missing_skills.len();
        let total = gap.total_required_skills as f64;
        gap.gap_percentage = if total > 0.0 {
            (gap.missing_skills_count as f64 + 0.5 * gap.partial_skills_count as f64) / total
                * 100.0
        } else {
            0.0
        };
        gap.overlap_percentage = 100.0 - gap.gap_percentage;
        gap.estimated_learning_time_weeks = self
            .analyzer
            .estimate_learning_time(&gap.missing_skills, &gap.partial_skills);

        let score = self.scorer.update_score_after_simulation(
            &baseline.readiness_score,
            &ScoreAdjustments {
                coverage_change: 10.0,
                depth_change: -5.0,
                consistency_change: -3.0,
            },
        );

        let changes = ChangeSummary {
            score_change: score.change_from_baseline.unwrap_or(0.0),
            time_change: gap.estimated_learning_time_weeks - baseline.learning_time_weeks,
            gap_change: gap.gap_percentage - baseline.gap_analysis.gap_percentage,
        };

        self.finish(
            ScenarioDetail::SkipCertifications {
                skipped: certification_skills.to_vec(),
                removed_skills,
            },
            baseline.career.clone(),
            baseline.user_skills.clone(),
            gap,
            score,
            changes,
            Some(Advisory {
                kind: AdvisoryKind::Warning,
                message: "Skipping certifications may reduce competitiveness in the job market"
                    .to_string(),
            }),
        )
    }

    /// Promotes named partially-known skills to known and shortens the
    /// timeline by a flat 25%.
    pub fn simulate_focus_projects(
        &self,
        baseline: &Baseline,
        project_skills: &[String],
    ) -> SimulationResult {
        let mut gap = baseline.gap_analysis.clone();

        let mut newly_mastered = Vec::new();
        for skill in project_skills {
            if let Some(position) = gap.partial_skills.iter().position(|s| s == skill) {
                gap.partial_skills.remove(position);
                gap.matched_skills.push(skill.clone());
                newly_mastered.push(skill.clone());
            }
        }

        gap.known_skills_count = gap.matched_skills.len();
        gap.partial_skills_count = gap.partial_skills.len();
        let total = gap.total_required_skills as f64;
        gap.gap_percentage = if total > 0.0 {
            (gap.missing_skills_count as f64 + 0.5 * gap.partial_skills_count as f64) / total
                * 100.0
        } else {
            0.0
        };
        gap.estimated_learning_time_weeks = baseline.learning_time_weeks * 0.75;

        let score = self.scorer.update_score_after_simulation(
            &baseline.readiness_score,
            &ScoreAdjustments {
                coverage_change: newly_mastered.len() as f64 * 3.0,
                depth_change: 5.0,
                consistency_change: 5.0,
            },
        );

        let changes = ChangeSummary {
            score_change: score.change_from_baseline.unwrap_or(0.0),
            time_change: gap.estimated_learning_time_weeks - baseline.learning_time_weeks,
            gap_change: gap.gap_percentage - baseline.gap_analysis.gap_percentage,
        };

        let mut user_skills = baseline.user_skills.clone();
        user_skills.extend(newly_mastered.iter().cloned());

        self.finish(
            ScenarioDetail::FocusProjects {
                focus_skills: project_skills.to_vec(),
                newly_mastered,
            },
            baseline.career.clone(),
            user_skills,
            gap,
            score,
            changes,
            Some(Advisory {
                kind: AdvisoryKind::Benefit,
                message: "Project-based learning accelerates practical skill development"
                    .to_string(),
            }),
        )
    }

    /// Shifts the timeline out by `pause_weeks` and applies a capped decay
    /// penalty. The gap itself is untouched; only the timeline moves.
    pub fn simulate_pause_learning(&self, baseline: &Baseline, pause_weeks: u32) -> SimulationResult {
        let mut gap = baseline.gap_analysis.clone();
        gap.estimated_learning_time_weeks = baseline.learning_time_weeks + pause_weeks as f64;

        let decay_penalty = (pause_weeks as f64 * 0.5).min(10.0);
        let score = self.scorer.update_score_after_simulation(
            &baseline.readiness_score,
            &ScoreAdjustments {
                coverage_change: 0.0,
                depth_change: -decay_penalty * 0.6,
                consistency_change: -decay_penalty * 0.4,
            },
        );

        let changes = ChangeSummary {
            score_change: score.change_from_baseline.unwrap_or(0.0),
            time_change: pause_weeks as f64,
            gap_change: 0.0,
        };

        self.finish(
            ScenarioDetail::PauseLearning {
                pause_weeks,
                decay_penalty,
            },
            baseline.career.clone(),
            baseline.user_skills.clone(),
            gap,
            score,
            changes,
            Some(Advisory {
                kind: AdvisoryKind::Warning,
                message: format!(
                    "Pausing for {pause_weeks} weeks may cause skill decay and delay career readiness"
                ),
            }),
        )
    }

    /// Re-analyzes with the union of current and newly learned skills.
    /// A full re-run against the same role.
    pub fn simulate_add_skills(
        &self,
        baseline: &Baseline,
        new_skills: &[String],
        role: &Role,
    ) -> SimulationResult {
        let mut combined = baseline.user_skills.clone();
        combined.extend(new_skills.iter().cloned());
        let user_skills = dedup_skills(&combined);

        let gap = self.analyzer.analyze_gap(&user_skills, role);
        let score = self.scorer.calculate_score(&gap, None);

        let moved_to_known: Vec<String> = new_skills
            .iter()
            .filter(|skill| gap.matched_skills.contains(skill))
            .cloned()
            .collect();

        let changes = ChangeSummary {
            score_change: score.overall_score - baseline.readiness_score.overall_score,
            time_change: gap.estimated_learning_time_weeks - baseline.learning_time_weeks,
            gap_change: gap.gap_percentage - baseline.gap_analysis.gap_percentage,
        };

        let message = format!(
            "Adding {} skills improves readiness significantly",
            new_skills.len()
        );
        self.finish(
            ScenarioDetail::AddSkills {
                added_skills: new_skills.to_vec(),
                moved_to_known,
            },
            baseline.career.clone(),
            user_skills,
            gap,
            score,
            changes,
            Some(Advisory {
                kind: AdvisoryKind::Benefit,
                message,
            }),
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn finish(
        &self,
        scenario: ScenarioDetail,
        career: String,
        user_skills: Vec<String>,
        gap_analysis: GapAnalysis,
        readiness_score: ReadinessScore,
        changes: ChangeSummary,
        advisory: Option<Advisory>,
    ) -> SimulationResult {
        let risk_level = RiskLevel::classify(
            readiness_score.overall_score,
            gap_analysis.gap_percentage,
        );
        debug!(
            scenario = scenario.label(),
            score_change = changes.score_change,
            "scenario simulated"
        );
        SimulationResult {
            id: Uuid::new_v4(),
            learning_time_weeks: gap_analysis.estimated_learning_time_weeks,
            scenario,
            career,
            user_skills,
            gap_analysis,
            readiness_score,
            risk_level,
            changes,
            advisory,
            created_at: Utc::now(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Comparison
// ────────────────────────────────────────────────────────────────────────────

/// Advisory labels attached by [`compare_simulations`]. Not mutually
/// exclusive: a result can be both the best outcome and the fastest path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonLabel {
    BestOverallOutcome,
    FastestPath,
    HighestScoreGain,
    ConsiderTradeOffs,
}

impl ComparisonLabel {
    pub fn message(&self) -> &'static str {
        match self {
            ComparisonLabel::BestOverallOutcome => "Best Overall Outcome",
            ComparisonLabel::FastestPath => "Fastest Path",
            ComparisonLabel::HighestScoreGain => "Highest Score Gain",
            ComparisonLabel::ConsiderTradeOffs => "Consider Trade-offs",
        }
    }
}

/// One row of the side-by-side scenario comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationComparison {
    pub scenario: String,
    pub readiness_score: f64,
    pub score_change: f64,
    pub time_weeks: f64,
    pub time_change: f64,
    pub risk_level: RiskLevel,
    pub gap_percentage: f64,
    pub rank: usize,
    pub labels: Vec<ComparisonLabel>,
}

/// Projects and ranks simulation results for side-by-side display.
/// Stable sort by readiness score descending; rank 1 is labeled best
/// overall, negative time deltas are the fastest path regardless of rank,
/// score gains above 5 points are highlighted, and anything unlabeled is a
/// trade-off call.
pub fn compare_simulations(results: &[SimulationResult]) -> Vec<SimulationComparison> {
    let mut comparisons: Vec<SimulationComparison> = results
        .iter()
        .map(|result| SimulationComparison {
            scenario: result.scenario.label().to_string(),
            readiness_score: result.readiness_score.overall_score,
            score_change: result.changes.score_change,
            time_weeks: result.learning_time_weeks,
            time_change: result.changes.time_change,
            risk_level: result.risk_level,
            gap_percentage: result.gap_analysis.gap_percentage,
            rank: 0,
            labels: Vec::new(),
        })
        .collect();

    comparisons.sort_by(|a, b| {
        b.readiness_score
            .partial_cmp(&a.readiness_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    for (index, comparison) in comparisons.iter_mut().enumerate() {
        comparison.rank = index + 1;
        if index == 0 {
            comparison.labels.push(ComparisonLabel::BestOverallOutcome);
        }
        if comparison.time_change < 0.0 {
            comparison.labels.push(ComparisonLabel::FastestPath);
        }
        if comparison.score_change > 5.0 {
            comparison.labels.push(ComparisonLabel::HighestScoreGain);
        }
        if comparison.labels.is_empty() {
            comparison.labels.push(ComparisonLabel::ConsiderTradeOffs);
        }
    }
    comparisons
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Order-preserving set difference: items of `a` not present in `b`.
fn difference(a: &[String], b: &[String]) -> Vec<String> {
    a.iter().filter(|item| !b.contains(item)).cloned().collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
