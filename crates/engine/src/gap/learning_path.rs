//! Learning-path ordering and plan helpers.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::SkillCatalog;
use crate::gap::{SkillDetail, SkillStatus};
use crate::models::reference::Difficulty;

/// What a plan entry asks of the learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskAction {
    /// Skill is missing entirely.
    Learn,
    /// Skill is partially known and needs deepening.
    Improve,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningTask {
    pub skill: String,
    pub action: TaskAction,
    pub difficulty: Difficulty,
}

/// One phase of a multi-week learning plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningPhase {
    pub phase: usize,
    pub duration_weeks: u32,
    pub skills: Vec<LearningTask>,
}

/// Orders the skills still to learn so prerequisites come first.
///
/// Candidates (missing + partial) are taken importance-descending, with
/// easier skills first on ties, then emitted greedily: a skill is eligible
/// once all its prerequisites are in the known set (seeded with the
/// already-known skills, growing as the path is built). When nothing is
/// eligible (a cycle, or a prerequisite outside this analysis) the first
/// remaining skill is force-appended so the path always terminates.
pub fn learning_path(skill_details: &[SkillDetail]) -> Vec<SkillDetail> {
    let mut known: Vec<String> = skill_details
        .iter()
        .filter(|d| d.status == SkillStatus::Known)
        .map(|d| d.skill.to_lowercase())
        .collect();

    let mut to_learn: Vec<SkillDetail> = skill_details
        .iter()
        .filter(|d| d.status != SkillStatus::Known)
        .cloned()
        .collect();
    to_learn.sort_by(|a, b| {
        b.importance
            .partial_cmp(&a.importance)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.difficulty.rank().cmp(&b.difficulty.rank()))
    });

    let mut path = Vec::with_capacity(to_learn.len());
    while !to_learn.is_empty() {
        let eligible = to_learn.iter().position(|candidate| {
            candidate
                .prerequisites
                .iter()
                .all(|p| known.contains(&p.to_lowercase()))
        });

        let index = match eligible {
            Some(index) => index,
            None => {
                // Cycle or permanently missing prerequisite: force progress.
                warn!(
                    skill = %to_learn[0].skill,
                    "no learnable skill with satisfied prerequisites; forcing order"
                );
                0
            }
        };

        let next = to_learn.remove(index);
        known.push(next.skill.to_lowercase());
        path.push(next);
    }
    path
}

/// Groups the skills to learn into phases of three, easiest first.
pub fn weekly_plan(
    missing: &[String],
    partial: &[String],
    catalog: &SkillCatalog,
    weeks_per_phase: u32,
) -> Vec<LearningPhase> {
    let mut tasks: Vec<LearningTask> = Vec::with_capacity(missing.len() + partial.len());
    for skill in missing {
        tasks.push(LearningTask {
            skill: skill.clone(),
            action: TaskAction::Learn,
            difficulty: catalog.learning_info(skill).difficulty,
        });
    }
    for skill in partial {
        tasks.push(LearningTask {
            skill: skill.clone(),
            action: TaskAction::Improve,
            difficulty: catalog.learning_info(skill).difficulty,
        });
    }
    tasks.sort_by_key(|task| task.difficulty.rank());

    tasks
        .chunks(3)
        .enumerate()
        .map(|(index, chunk)| LearningPhase {
            phase: index + 1,
            duration_weeks: weeks_per_phase,
            skills: chunk.to_vec(),
        })
        .collect()
}

/// Formats a week count as a readable timeline estimate.
pub fn format_timeline(weeks: f64) -> String {
    if weeks <= 4.0 {
        format!("{} weeks (1 month)", weeks as i64)
    } else if weeks <= 12.0 {
        format!("{} weeks ({:.1} months)", weeks as i64, weeks / 4.0)
    } else if weeks <= 52.0 {
        format!("{:.1} months", weeks / 4.0)
    } else {
        format!("{:.1} years", weeks / 52.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::reference::SkillRecord;

    fn detail(
        skill: &str,
        status: SkillStatus,
        importance: f64,
        difficulty: Difficulty,
        prerequisites: &[&str],
    ) -> SkillDetail {
        let coverage = match status {
            SkillStatus::Known => 1.0,
            SkillStatus::Partial => 0.5,
            SkillStatus::Missing => 0.0,
        };
        SkillDetail {
            skill: skill.to_string(),
            status,
            coverage,
            importance,
            weighted_score: coverage * importance,
            learning_time_weeks: 4.0,
            difficulty,
            prerequisites: prerequisites.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_path_puts_prerequisites_first() {
        let details = vec![
            detail(
                "Kubernetes",
                SkillStatus::Missing,
                0.9,
                Difficulty::Advanced,
                &["Docker"],
            ),
            detail("Docker", SkillStatus::Missing, 0.6, Difficulty::Beginner, &[]),
        ];
        let path = learning_path(&details);

        let order: Vec<&str> = path.iter().map(|d| d.skill.as_str()).collect();
        assert_eq!(order, vec!["Docker", "Kubernetes"]);
    }

    #[test]
    fn test_path_skips_known_skills() {
        let details = vec![
            detail("Python", SkillStatus::Known, 0.9, Difficulty::Beginner, &[]),
            detail("SQL", SkillStatus::Partial, 0.8, Difficulty::Beginner, &[]),
        ];
        let path = learning_path(&details);
        assert_eq!(path.len(), 1);
        assert_eq!(path[0].skill, "SQL");
    }

    #[test]
    fn test_known_prerequisite_unlocks_immediately() {
        let details = vec![
            detail("Docker", SkillStatus::Known, 0.6, Difficulty::Beginner, &[]),
            detail(
                "Kubernetes",
                SkillStatus::Missing,
                0.9,
                Difficulty::Advanced,
                &["Docker"],
            ),
        ];
        let path = learning_path(&details);
        assert_eq!(path.len(), 1);
        assert_eq!(path[0].skill, "Kubernetes");
    }

    #[test]
    fn test_cycle_forces_progress_instead_of_hanging() {
        let details = vec![
            detail("A", SkillStatus::Missing, 0.9, Difficulty::Beginner, &["B"]),
            detail("B", SkillStatus::Missing, 0.8, Difficulty::Beginner, &["A"]),
        ];
        let path = learning_path(&details);

        assert_eq!(path.len(), 2, "every skill must still appear");
        assert_eq!(path[0].skill, "A", "highest importance is forced first");
    }

    #[test]
    fn test_unsatisfiable_prerequisite_still_terminates() {
        let details = vec![detail(
            "Kubernetes",
            SkillStatus::Missing,
            0.9,
            Difficulty::Advanced,
            &["Docker"], // Docker absent from this analysis entirely
        )];
        let path = learning_path(&details);
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn test_equal_importance_orders_easier_first() {
        let details = vec![
            detail("Advanced Thing", SkillStatus::Missing, 0.8, Difficulty::Advanced, &[]),
            detail("Basics", SkillStatus::Missing, 0.8, Difficulty::Beginner, &[]),
        ];
        let path = learning_path(&details);
        assert_eq!(path[0].skill, "Basics");
    }

    fn plan_catalog() -> SkillCatalog {
        let records: Vec<SkillRecord> = [
            ("Python", "beginner"),
            ("SQL", "beginner"),
            ("AWS", "advanced"),
            ("Docker", "intermediate"),
        ]
        .iter()
        .map(|(name, difficulty)| SkillRecord {
            skill_name: name.to_string(),
            category: "Tech".to_string(),
            difficulty: difficulty.to_string(),
            learning_time_weeks: "4".to_string(),
            prerequisites: String::new(),
        })
        .collect();
        SkillCatalog::from_records(&records).unwrap()
    }

    #[test]
    fn test_weekly_plan_groups_three_per_phase() {
        let catalog = plan_catalog();
        let missing = vec!["Python".to_string(), "AWS".to_string(), "Docker".to_string()];
        let partial = vec!["SQL".to_string()];
        let plan = weekly_plan(&missing, &partial, &catalog, 4);

        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].phase, 1);
        assert_eq!(plan[0].skills.len(), 3);
        assert_eq!(plan[1].skills.len(), 1);
        assert_eq!(plan[0].duration_weeks, 4);
    }

    #[test]
    fn test_weekly_plan_orders_beginner_skills_first() {
        let catalog = plan_catalog();
        let missing = vec!["AWS".to_string(), "Python".to_string()];
        let plan = weekly_plan(&missing, &[], &catalog, 4);

        assert_eq!(plan[0].skills[0].skill, "Python");
        assert_eq!(plan[0].skills[0].action, TaskAction::Learn);
        assert_eq!(plan[0].skills[1].skill, "AWS");
    }

    #[test]
    fn test_weekly_plan_marks_partial_as_improve() {
        let catalog = plan_catalog();
        let plan = weekly_plan(&[], &["SQL".to_string()], &catalog, 2);
        assert_eq!(plan[0].skills[0].action, TaskAction::Improve);
    }

    #[test]
    fn test_weekly_plan_empty_inputs() {
        let catalog = plan_catalog();
        assert!(weekly_plan(&[], &[], &catalog, 4).is_empty());
    }

    #[test]
    fn test_format_timeline_buckets() {
        assert_eq!(format_timeline(3.0), "3 weeks (1 month)");
        assert_eq!(format_timeline(8.0), "8 weeks (2.0 months)");
        assert_eq!(format_timeline(20.0), "5.0 months");
        assert_eq!(format_timeline(78.0), "1.5 years");
    }
}
